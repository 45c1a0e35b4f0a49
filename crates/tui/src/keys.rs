use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use ember_core::chat::Key;

/// Normalize a terminal key event to the small key set the chat input
/// reacts to.
pub fn extract_key(event: &KeyEvent) -> Option<Key> {
    match event.code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Enter),
        _ => None,
    }
}

pub fn shift_held(event: &KeyEvent) -> bool {
    event.modifiers.contains(KeyModifiers::SHIFT)
}
