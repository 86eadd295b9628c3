use eframe::egui::Color32;

use crate::timer::Urgency;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    /// Help panel and timer badge fill.
    pub panel_background: Color32,
    pub panel_foreground: Color32,
    pub warning: Color32,
    pub alert: Color32,
    pub title_size: f32,
    pub body_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            panel_background: Color32::from_rgb(0x1F, 0x49, 0x7D),
            panel_foreground: Color32::from_rgb(0xE2, 0xE8, 0xF0),
            warning: Color32::from_rgb(0xF5, 0x9E, 0x0B),
            alert: Color32::from_rgb(0xEF, 0x44, 0x44),
            title_size: 72.0,
            body_size: 40.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x3E),
            accent: Color32::from_rgb(0x1F, 0x49, 0x7D),
            panel_background: Color32::from_rgb(0x1F, 0x49, 0x7D),
            panel_foreground: Color32::from_rgb(0xE2, 0xE8, 0xF0),
            warning: Color32::from_rgb(0xF5, 0x9E, 0x0B),
            alert: Color32::from_rgb(0xEF, 0x44, 0x44),
            title_size: 72.0,
            body_size: 40.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    pub fn timer_color(&self, urgency: Urgency) -> Color32 {
        match urgency {
            Urgency::Normal => Color32::WHITE,
            Urgency::Warning => self.warning,
            Urgency::Alert => self.alert,
        }
    }
}
