//! Key event handling for the chat pane.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::event::terminal::to_interpreter_key;
use crate::interpreter::Key;
use crate::ui::chat::TuiChat;

pub fn handle_key_event(chat: &mut TuiChat, key_evt: KeyEvent) {
    match key_evt.code {
        // Up/Down scroll the log; the chat input has no history to browse
        KeyCode::Up => chat.scroll(1),
        KeyCode::Down => chat.scroll(-1),
        KeyCode::PageUp => chat.scroll(10),
        KeyCode::PageDown => chat.scroll(-10),
        KeyCode::End if key_evt.modifiers.contains(KeyModifiers::SHIFT) => chat.scroll(isize::MIN),
        _ => {
            let Some(key) = to_interpreter_key(key_evt) else {
                return;
            };
            if matches!(key, Key::Tab | Key::Esc) {
                return;
            }
            if let Some(text) = chat.handle_key(key) {
                chat.send(&text);
            }
        }
    }
}
