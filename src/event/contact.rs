//! Key event handling for the contact pane.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::mail::Field;
use crate::ui::contact::TuiContact;

pub fn handle_key_event(contact: &mut TuiContact, key_evt: KeyEvent) {
    if key_evt.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return;
    }
    // the form is frozen while a message is in flight
    if contact.form().is_sending() {
        return;
    }

    match key_evt.code {
        KeyCode::Tab | KeyCode::Down => contact.form_mut().focus_next(),
        KeyCode::BackTab | KeyCode::Up => contact.form_mut().focus_prev(),
        KeyCode::Enter => {
            if contact.form().focus() == Field::Message {
                contact.submit();
            } else {
                contact.form_mut().focus_next();
            }
        }
        KeyCode::Backspace => contact.form_mut().backspace(),
        KeyCode::Char(c) => contact.form_mut().insert_char(c),
        _ => {}
    }
}
