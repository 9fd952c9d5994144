//! Key event handling for the hero and terminal panes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::engine::{ShellEngine, ShellOutcome};
use crate::interpreter::Key;
use crate::session::TranscriptEntry;
use crate::ui::hero::TuiHero;
use crate::ui::terminal::TuiTerminal;

/// Map a crossterm key to an interpreter key.
///
/// Control and Alt chords are not editing keys and map to `None`.
pub fn to_interpreter_key(key_evt: KeyEvent) -> Option<Key> {
    let KeyEvent { code, modifiers, .. } = key_evt;
    if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    let key = match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Esc,
        KeyCode::Enter => Key::Enter,
        _ => return None,
    };
    Some(key)
}

/// Scroll keys shared by the scrollback panes. Returns true when consumed.
fn handle_scroll(terminal: &mut TuiTerminal, key_evt: KeyEvent) -> bool {
    let shift = key_evt.modifiers.contains(KeyModifiers::SHIFT);
    match key_evt.code {
        KeyCode::PageUp => terminal.scroll(10),
        KeyCode::PageDown => terminal.scroll(-10),
        KeyCode::Up if shift => terminal.scroll(1),
        KeyCode::Down if shift => terminal.scroll(-1),
        _ => return false,
    }
    true
}

/// Handle a key in the terminal pane.
///
/// Returns the link to open when the submitted command asked for one.
pub fn handle_key_event(
    terminal: &mut TuiTerminal,
    engine: &mut ShellEngine,
    key_evt: KeyEvent,
) -> Option<&'static str> {
    if handle_scroll(terminal, key_evt) {
        return None;
    }
    let key = to_interpreter_key(key_evt)?;
    let submission = terminal.handle_key(key)?;

    // the command sees the history from before it was recorded
    let outcome = engine.respond(&submission.command, terminal.history());
    if let Some(history) = submission.history {
        terminal.set_history(history);
    }
    debug!(?outcome, "terminal command");

    let command = submission.command.trim();
    match outcome {
        ShellOutcome::Ignore => None,
        ShellOutcome::Clear => {
            terminal.clear();
            None
        }
        ShellOutcome::Reply { text, color } => {
            terminal.push(TranscriptEntry::reply(command, text).with_color(color));
            None
        }
        ShellOutcome::Open { url, text } => {
            terminal.push(TranscriptEntry::reply(command, text));
            Some(url)
        }
    }
}

/// Handle a key in the hero pane.
pub fn handle_hero_key_event(hero: &mut TuiHero, engine: &ShellEngine, key_evt: KeyEvent) {
    if handle_scroll(hero.terminal_mut(), key_evt) {
        return;
    }
    let Some(key) = to_interpreter_key(key_evt) else {
        return;
    };
    let terminal = hero.terminal_mut();
    let Some(submission) = terminal.handle_key(key) else {
        return;
    };
    if let Some(history) = submission.history {
        terminal.set_history(history);
    }

    match engine.respond_hero(&submission.command) {
        ShellOutcome::Clear => terminal.clear(),
        outcome => {
            if let Some(text) = outcome.text() {
                terminal.push(TranscriptEntry::banner(text, std::time::Duration::ZERO));
            }
        }
    }
}
