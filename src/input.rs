//! Keyboard mapping for stopwatch commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::timer::Command;

/// Map a key press to a command. Letters are case-insensitive; anything else is ignored.
#[must_use]
pub fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'C') => Some(Command::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(' ') => Some(Command::TogglePause),
        KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
            'q' => Some(Command::Quit),
            'r' => Some(Command::Reset),
            'l' => Some(Command::Lap),
            's' => Some(Command::Save),
            _ => None,
        },
        _ => None,
    }
}
