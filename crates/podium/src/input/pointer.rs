use super::{Command, InputEvent, InputHandler, NavButton};

/// On-screen buttons, double-click and overlay clicks.
pub struct PointerAdapter;

impl InputHandler for PointerAdapter {
    fn name(&self) -> &'static str {
        "pointer"
    }

    fn handle(&mut self, event: &InputEvent) -> Option<Command> {
        match event {
            InputEvent::ButtonClicked(NavButton::Next) => Some(Command::Next),
            InputEvent::ButtonClicked(NavButton::Previous) => Some(Command::Previous),
            InputEvent::DoubleClick => Some(Command::ToggleFullscreen),
            InputEvent::OverlayClicked => Some(Command::HideHelp),
            _ => None,
        }
    }
}
