use eframe::egui;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::deck::Deck;
use crate::help;
use crate::input::{self, InputBus, InputEvent, Modifiers, NavButton, Point};
use crate::session::{HostRequest, PresentationSession, SessionOptions};
use crate::theme::Theme;
use crate::timer::pulse_opacity;

const TIMER_REFRESH: Duration = Duration::from_millis(250);
const FULLSCREEN_CONFIRM_TIMEOUT: Duration = Duration::from_secs(1);

pub struct LaunchOptions {
    pub file: PathBuf,
    pub windowed: bool,
    /// 1-based.
    pub start_slide: Option<usize>,
    pub timer_minutes: Option<u64>,
    pub theme: Option<&'static str>,
}

/// A fullscreen change we asked the window for and have not seen happen yet.
struct PendingFullscreen {
    target: bool,
    requested: Instant,
}

struct PresentationApp {
    session: PresentationSession,
    bus: InputBus,
    theme: Theme,
    pending_fullscreen: Option<PendingFullscreen>,
    /// Pulse animation clock for the timer alert state.
    started: Instant,
}

impl PresentationApp {
    fn new(session: PresentationSession, bus: InputBus, theme: Theme) -> Self {
        Self {
            session,
            bus,
            theme,
            pending_fullscreen: None,
            started: Instant::now(),
        }
    }

    fn compute_scale(rect: egui::Rect) -> f32 {
        let ref_w = 1920.0;
        let ref_h = 1080.0;
        (rect.width() / ref_w).min(rect.height() / ref_h)
    }

    /// Translate this frame's raw egui events into input events.
    fn collect_input(ctx: &egui::Context) -> Vec<InputEvent> {
        ctx.input(|i| {
            let mut events = Vec::new();
            for event in &i.events {
                match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => {
                        if let Some(key) = map_egui_key(*key) {
                            events.push(InputEvent::Key {
                                key,
                                modifiers: Modifiers {
                                    ctrl: modifiers.ctrl,
                                    meta: modifiers.mac_cmd,
                                    shift: modifiers.shift,
                                },
                            });
                        }
                    }
                    egui::Event::Touch { id, phase, pos, .. } => {
                        let id = id.0;
                        let pos = Point::new(pos.x, pos.y);
                        match phase {
                            egui::TouchPhase::Start => events.push(InputEvent::TouchStart { id, pos }),
                            egui::TouchPhase::End => events.push(InputEvent::TouchEnd { id, pos }),
                            egui::TouchPhase::Cancel => events.push(InputEvent::TouchCancel { id }),
                            egui::TouchPhase::Move => {}
                        }
                    }
                    _ => {}
                }
            }
            events
        })
    }

    fn sync_fullscreen(&mut self, ctx: &egui::Context) {
        let actual = ctx.input(|i| i.viewport().fullscreen.unwrap_or(false));
        self.session.on_fullscreen_changed(actual);

        if let Some(pending) = &self.pending_fullscreen {
            if pending.target == actual {
                self.pending_fullscreen = None;
            } else if pending.requested.elapsed() >= FULLSCREEN_CONFIRM_TIMEOUT {
                self.session
                    .fullscreen_rejected("window did not change fullscreen state");
                self.pending_fullscreen = None;
            } else {
                ctx.request_repaint_after(Duration::from_millis(100));
            }
        }
    }

    fn apply_host_requests(&mut self, ctx: &egui::Context) {
        for request in self.session.take_requests() {
            match request {
                HostRequest::SetTitle(title) => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
                }
                HostRequest::EnterFullscreen | HostRequest::ExitFullscreen => {
                    let target = request == HostRequest::EnterFullscreen;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(target));
                    self.pending_fullscreen = Some(PendingFullscreen {
                        target,
                        requested: Instant::now(),
                    });
                }
            }
        }
    }
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_fullscreen(ctx);

        let mut events = Self::collect_input(ctx);
        let bg = self.theme.background;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                let surface = ui.interact(rect, ui.id().with("slide_surface"), egui::Sense::click());
                if surface.double_clicked() {
                    events.push(InputEvent::DoubleClick);
                }

                let scale = Self::compute_scale(rect);
                self.draw_slide(ui, rect, scale);
                self.draw_progress_bar(ui, rect, scale);
            });

        let screen = ctx.screen_rect();
        let scale = Self::compute_scale(screen);
        if let Some(button) = self.draw_navigation(ctx, scale) {
            events.push(InputEvent::ButtonClicked(button));
        }
        self.draw_timer(ctx, scale);
        if self.session.help().is_visible() && draw_help_overlay(ctx, &self.theme, screen, scale) {
            events.push(InputEvent::OverlayClicked);
        }

        for event in &events {
            self.bus.dispatch(event, &mut self.session);
        }
        if !events.is_empty() {
            ctx.request_repaint();
        }

        self.apply_host_requests(ctx);

        // Refresh loop: only scheduled while the timer is running.
        if self.session.timer().is_running() {
            ctx.request_repaint_after(TIMER_REFRESH);
        }
    }
}

impl PresentationApp {
    fn draw_slide(&mut self, ui: &mut egui::Ui, rect: egui::Rect, scale: f32) {
        let navigator = self.session.navigator();
        let Some(index) = navigator.active_slides().next() else {
            return;
        };
        let Some(slide) = navigator.deck().slide(index).cloned() else {
            return;
        };
        let padding = 120.0 * scale;
        let content = rect.shrink(padding);
        let mut y = content.top();

        if let Some(title) = &slide.title {
            let galley = ui.painter().layout(
                title.clone(),
                egui::FontId::proportional(self.theme.title_size * scale),
                self.theme.heading_color,
                content.width(),
            );
            let title_rect = egui::Rect::from_min_size(egui::pos2(content.left(), y), galley.size());
            y += galley.size().y + 40.0 * scale;
            ui.painter()
                .galley(title_rect.min, galley, self.theme.heading_color);

            // The heading is the focus target announced to screen readers.
            let heading = ui.interact(
                title_rect,
                egui::Id::new(("slide_heading", index)),
                egui::Sense::focusable_noninteractive(),
            );
            let announcement = self.session.chrome().announcement.clone();
            heading.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Label, true, announcement.clone())
            });
            if self.session.take_focus_request() == Some(index) {
                heading.request_focus();
            }
        } else {
            self.session.take_focus_request();
        }

        let body = slide.content();
        if !body.is_empty() {
            let galley = ui.painter().layout(
                body,
                egui::FontId::proportional(self.theme.body_size * scale),
                self.theme.foreground,
                content.width(),
            );
            ui.painter()
                .galley(egui::pos2(content.left(), y), galley, self.theme.foreground);
        }
    }

    fn draw_progress_bar(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let height = 6.0 * scale.max(0.5);
        let width = rect.width() * self.session.chrome().progress;
        let bar = egui::Rect::from_min_size(rect.left_top(), egui::vec2(width, height));
        ui.painter().rect_filled(bar, 0.0, self.theme.accent);
    }

    /// Previous/next buttons with the slide counter between them.
    fn draw_navigation(&self, ctx: &egui::Context, scale: f32) -> Option<NavButton> {
        let chrome = self.session.chrome();
        let bottom = if self.session.is_fullscreen() { 40.0 } else { 20.0 };
        let mut clicked = None;

        egui::Area::new(egui::Id::new("navigation_controls"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -bottom))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let font = egui::FontId::proportional((28.0 * scale).max(14.0));
                    let prev = egui::Button::new(egui::RichText::new("\u{25C0}").font(font.clone()));
                    if ui.add_enabled(chrome.previous_enabled, prev).clicked() {
                        clicked = Some(NavButton::Previous);
                    }
                    ui.label(
                        egui::RichText::new(&chrome.counter)
                            .font(egui::FontId::monospace((20.0 * scale).max(12.0)))
                            .color(Theme::with_opacity(self.theme.foreground, 0.6)),
                    );
                    let next = egui::Button::new(egui::RichText::new("\u{25B6}").font(font));
                    if ui.add_enabled(chrome.next_enabled, next).clicked() {
                        clicked = Some(NavButton::Next);
                    }
                });
            });

        clicked
    }

    fn draw_timer(&self, ctx: &egui::Context, scale: f32) {
        let Some(display) = self.session.timer().tick() else {
            return;
        };
        let opacity = if display.urgency.pulses() {
            pulse_opacity(self.started.elapsed().as_secs_f32())
        } else {
            1.0
        };
        let text_color = Theme::with_opacity(self.theme.timer_color(display.urgency), opacity);
        let bg = Theme::with_opacity(self.theme.panel_background, 0.9);

        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("presentation_timer"),
        ));
        let galley = painter.layout_no_wrap(
            display.text,
            egui::FontId::monospace((20.0 * scale).max(14.0)),
            text_color,
        );
        let padding = egui::vec2(16.0, 8.0) * scale.max(0.5);
        let badge = egui::Rect::from_min_size(
            egui::pos2(20.0, 20.0),
            galley.size() + padding * 2.0,
        );
        painter.rect_filled(badge, badge.height() / 2.0, bg);
        painter.galley(badge.min + padding, galley, text_color);
    }
}

/// Draw the shortcut reference. Returns true when the overlay was clicked.
fn draw_help_overlay(ctx: &egui::Context, theme: &Theme, screen: egui::Rect, scale: f32) -> bool {
    let scale = scale.max(0.5);
    let mut clicked = false;

    egui::Area::new(egui::Id::new("help_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let response = ui.allocate_rect(screen, egui::Sense::click());
            clicked = response.clicked();

            let painter = ui.painter();
            painter.rect_filled(screen, 0.0, egui::Color32::from_black_alpha(204));

            let padding = 40.0 * scale;
            let line_height = 34.0 * scale;
            let rows = help::SHORTCUTS.len() + help::TOUCH_SHORTCUTS.len();
            let height = rows as f32 * line_height + padding * 2.0 + 200.0 * scale;
            let panel = egui::Rect::from_center_size(
                screen.center(),
                egui::vec2(640.0 * scale, height),
            );
            painter.rect_filled(panel, 12.0 * scale, theme.panel_background);

            let title_color = egui::Color32::WHITE;
            let key_color = theme.panel_foreground;
            let text_color = Theme::with_opacity(egui::Color32::WHITE, 0.9);

            let title = painter.layout_no_wrap(
                help::TITLE.to_string(),
                egui::FontId::proportional(24.0 * scale),
                title_color,
            );
            let title_pos = egui::pos2(panel.center().x - title.size().x / 2.0, panel.top() + padding);
            painter.galley(title_pos, title, title_color);

            let mut y = panel.top() + padding + 56.0 * scale;
            let draw_rows = |rows: &[(&str, &str)], y: &mut f32| {
                for (key, desc) in rows {
                    let key_galley = painter.layout_no_wrap(
                        key.to_string(),
                        egui::FontId::monospace(15.0 * scale),
                        key_color,
                    );
                    painter.galley(egui::pos2(panel.left() + padding, *y), key_galley, key_color);

                    let desc_galley = painter.layout_no_wrap(
                        desc.to_string(),
                        egui::FontId::proportional(16.0 * scale),
                        text_color,
                    );
                    painter.galley(
                        egui::pos2(panel.left() + padding + 240.0 * scale, *y),
                        desc_galley,
                        text_color,
                    );
                    *y += line_height;
                }
            };

            draw_rows(help::SHORTCUTS, &mut y);

            y += 24.0 * scale;
            let touch_title = painter.layout_no_wrap(
                help::TOUCH_TITLE.to_string(),
                egui::FontId::proportional(18.0 * scale),
                key_color,
            );
            painter.galley(egui::pos2(panel.left() + padding, y), touch_title, key_color);
            y += 36.0 * scale;
            draw_rows(help::TOUCH_SHORTCUTS, &mut y);

            let hint_color = Theme::with_opacity(theme.panel_foreground, 0.8);
            let hint = painter.layout_no_wrap(
                help::DISMISS_HINT.to_string(),
                egui::FontId::proportional(14.0 * scale),
                hint_color,
            );
            let hint_pos = egui::pos2(
                panel.center().x - hint.size().x / 2.0,
                panel.bottom() - padding,
            );
            painter.galley(hint_pos, hint, hint_color);
        });

    clicked
}

fn map_egui_key(key: egui::Key) -> Option<input::Key> {
    use egui::Key as E;
    use input::Key;

    let mapped = match key {
        E::ArrowLeft => Key::ArrowLeft,
        E::ArrowRight => Key::ArrowRight,
        E::Space => Key::Space,
        E::PageUp => Key::PageUp,
        E::PageDown => Key::PageDown,
        E::Home => Key::Home,
        E::End => Key::End,
        E::Escape => Key::Escape,
        E::Num0 => Key::Digit(0),
        E::Num1 => Key::Digit(1),
        E::Num2 => Key::Digit(2),
        E::Num3 => Key::Digit(3),
        E::Num4 => Key::Digit(4),
        E::Num5 => Key::Digit(5),
        E::Num6 => Key::Digit(6),
        E::Num7 => Key::Digit(7),
        E::Num8 => Key::Digit(8),
        E::Num9 => Key::Digit(9),
        E::F => Key::Char('f'),
        E::T => Key::Char('t'),
        E::Slash => Key::Char('/'),
        E::Questionmark => Key::Char('?'),
        _ => return None,
    };
    Some(mapped)
}

/// Launch settings after applying precedence: command line, then deck
/// front matter (theme only), then config, then built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchSettings {
    pub theme: String,
    pub timer_duration: Duration,
    pub windowed: bool,
}

pub fn resolve(options: &LaunchOptions, deck: &Deck, config: &Config) -> LaunchSettings {
    let theme = options
        .theme
        .or(deck.theme())
        .or(config.theme())
        .unwrap_or("light")
        .to_string();
    let timer_duration = options
        .timer_minutes
        .map(|m| Duration::from_secs(m * 60))
        .unwrap_or_else(|| config.timer_duration());

    LaunchSettings {
        theme,
        timer_duration,
        windowed: options.windowed || config.windowed(),
    }
}

pub fn run(options: LaunchOptions) -> anyhow::Result<()> {
    let deck = Deck::load(&options.file)?;
    let config = Config::load_or_default()?;

    let settings = resolve(&options, &deck, &config);
    let theme = Theme::from_name(&settings.theme);
    let timer_duration = settings.timer_duration;
    let windowed = settings.windowed;

    let mut session = PresentationSession::new(deck, SessionOptions { timer_duration });
    if let Some(number) = options.start_slide {
        session.go_to_slide(number);
    }
    let bus = InputBus::with_adapters(&config.input_settings());

    let title = session.window_title();
    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "podium",
        native_options,
        Box::new(move |_cc| Ok(Box::new(PresentationApp::new(session, bus, theme)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_egui_key() {
        assert_eq!(map_egui_key(egui::Key::ArrowRight), Some(input::Key::ArrowRight));
        assert_eq!(map_egui_key(egui::Key::Num7), Some(input::Key::Digit(7)));
        assert_eq!(map_egui_key(egui::Key::Questionmark), Some(input::Key::Char('?')));
        assert_eq!(map_egui_key(egui::Key::Q), None);
    }

    fn options() -> LaunchOptions {
        LaunchOptions {
            file: PathBuf::from("talk.md"),
            windowed: false,
            start_slide: None,
            timer_minutes: None,
            theme: None,
        }
    }

    fn deck(front_matter: &str) -> Deck {
        Deck::parse(&format!("{front_matter}# Intro\n\nHello")).unwrap()
    }

    fn config(pairs: &[(&str, &str)]) -> Config {
        let mut config = Config::default();
        for (key, value) in pairs {
            config.set(key, value).unwrap();
        }
        config
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = resolve(&options(), &deck(""), &Config::default());
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.timer_duration, Duration::from_secs(20 * 60));
        assert!(!settings.windowed);
    }

    #[test]
    fn test_resolve_theme_precedence() {
        let dark_config = config(&[("defaults.theme", "dark")]);
        assert_eq!(resolve(&options(), &deck(""), &dark_config).theme, "dark");

        let light_deck = deck("---\ntheme: light\n---\n");
        assert_eq!(resolve(&options(), &light_deck, &dark_config).theme, "light");

        let dark_deck = deck("---\ntheme: dark\n---\n");
        let cli = LaunchOptions {
            theme: Some("light"),
            ..options()
        };
        assert_eq!(resolve(&cli, &dark_deck, &dark_config).theme, "light");
    }

    #[test]
    fn test_resolve_timer_precedence() {
        let config = config(&[("timer.minutes", "45")]);
        assert_eq!(
            resolve(&options(), &deck(""), &config).timer_duration,
            Duration::from_secs(45 * 60)
        );

        let cli = LaunchOptions {
            timer_minutes: Some(10),
            ..options()
        };
        assert_eq!(
            resolve(&cli, &deck(""), &config).timer_duration,
            Duration::from_secs(10 * 60)
        );
    }

    #[test]
    fn test_resolve_windowed_from_flag_or_config() {
        let cli = LaunchOptions {
            windowed: true,
            ..options()
        };
        assert!(resolve(&cli, &deck(""), &Config::default()).windowed);

        let config = config(&[("defaults.windowed", "true")]);
        assert!(resolve(&options(), &deck(""), &config).windowed);
    }

    #[test]
    fn test_compute_scale() {
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(960.0, 1080.0));
        assert_eq!(PresentationApp::compute_scale(rect), 0.5);
    }
}
