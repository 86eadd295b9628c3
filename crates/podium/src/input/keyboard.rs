use super::{Command, InputEvent, InputHandler, Key, Modifiers};

/// Maps key presses to commands.
pub struct KeyboardAdapter;

impl InputHandler for KeyboardAdapter {
    fn name(&self) -> &'static str {
        "keyboard"
    }

    fn handle(&mut self, event: &InputEvent) -> Option<Command> {
        match event {
            InputEvent::Key { key, modifiers } => map_key(*key, *modifiers),
            _ => None,
        }
    }
}

pub fn map_key(key: Key, modifiers: Modifiers) -> Option<Command> {
    if modifiers.command() {
        match key {
            Key::Digit(d @ 1..=9) => return Some(Command::GoTo(usize::from(d) - 1)),
            Key::Char('f' | 'F') => return Some(Command::ToggleFullscreen),
            Key::Char('t' | 'T') => return Some(Command::ToggleTimer),
            _ => {}
        }
    }

    match key {
        Key::ArrowRight | Key::Space | Key::PageDown => Some(Command::Next),
        Key::ArrowLeft | Key::PageUp => Some(Command::Previous),
        Key::Home => Some(Command::First),
        Key::End => Some(Command::Last),
        Key::Escape => Some(Command::ExitFullscreen),
        Key::Char('?') => Some(Command::ToggleHelp),
        Key::Char('/') if modifiers.shift => Some(Command::ToggleHelp),
        _ => None,
    }
}
