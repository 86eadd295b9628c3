/// Keyboard and pointer shortcuts shown in the help panel.
pub const SHORTCUTS: &[(&str, &str)] = &[
    ("\u{2192} / Space / Page Down", "Next slide"),
    ("\u{2190} / Page Up", "Previous slide"),
    ("Home", "First slide"),
    ("End", "Last slide"),
    ("Ctrl/Cmd + F", "Toggle fullscreen"),
    ("Ctrl/Cmd + T", "Toggle timer"),
    ("Ctrl/Cmd + 1-9", "Go to slide number"),
    ("Double-click", "Toggle fullscreen"),
    ("Escape", "Exit fullscreen"),
    ("?", "Show/hide this help"),
];

pub const TOUCH_SHORTCUTS: &[(&str, &str)] = &[
    ("Swipe Left", "Next slide"),
    ("Swipe Right", "Previous slide"),
    ("Tap Buttons", "Navigate slides"),
];

pub const TITLE: &str = "Presentation Controls";
pub const TOUCH_TITLE: &str = "Touch Controls";
pub const DISMISS_HINT: &str = "Click anywhere or press ? to close";

/// Presence of the shortcut reference panel. Nothing else is tracked.
#[derive(Debug, Clone, Default)]
pub struct HelpOverlay {
    visible: bool,
}

impl HelpOverlay {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the panel. Showing an already visible panel closes it.
    pub fn show(&mut self) {
        if self.visible {
            self.hide();
            return;
        }
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle(&mut self) {
        if self.visible {
            self.hide();
        } else {
            self.show();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut help = HelpOverlay::default();
        assert!(!help.is_visible());
        help.toggle();
        assert!(help.is_visible());
        help.toggle();
        assert!(!help.is_visible());
    }

    #[test]
    fn test_show_twice_closes() {
        let mut help = HelpOverlay::default();
        help.show();
        help.show();
        assert!(!help.is_visible());
    }

    #[test]
    fn test_hide_when_hidden_is_noop() {
        let mut help = HelpOverlay::default();
        help.hide();
        assert!(!help.is_visible());
    }

    #[test]
    fn test_reference_lists_every_binding() {
        let keys: Vec<&str> = SHORTCUTS.iter().map(|(k, _)| *k).collect();
        assert!(keys.contains(&"Ctrl/Cmd + T"));
        assert!(keys.contains(&"?"));
        assert_eq!(TOUCH_SHORTCUTS.len(), 3);
    }
}
