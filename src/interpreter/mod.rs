//! Line-editing state machine shared by the hero and terminal panes.
//!
//! The interpreter turns keystrokes into a submitted command string. It
//! offers history recall and prefix autocompletion, but knows nothing about
//! what the commands mean. Meaning lives in [`crate::engine`].
//!
//! History is owned by the caller. [`CommandInterpreter::handle_key`] only
//! reads it. After a non-empty submission it returns the updated copy in
//! the [`Submission`], so the caller can run the command against the old
//! history first and adopt the new one afterwards.

mod history;
mod suggest;

pub use history::{History, MAX_HISTORY_SIZE};
pub use suggest::{filter_vocabulary, Suggestions};

/// Editing keys the interpreter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Previous suggestion or older history entry.
    Up,
    /// Next suggestion or newer history entry.
    Down,
    /// Accept suggestion.
    Tab,
    /// Dismiss suggestions.
    Esc,
    Enter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpreterState {
    Editing,
    BrowsingHistory,
    BrowsingSuggestions,
}

/// A submitted line, emitted once per Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The submitted text, verbatim (may be empty).
    pub command: String,
    /// The caller's history with `command` recorded. `None` when nothing was recorded.
    pub history: Option<History>,
}

pub struct CommandInterpreter {
    vocabulary: &'static [&'static str],
    buffer: String,
    /// Cursor position in chars.
    cursor: usize,
    suggestions: Suggestions,
    /// Steps back from the newest history entry while browsing.
    history_index: Option<usize>,
}

impl CommandInterpreter {
    pub fn new(vocabulary: &'static [&'static str]) -> Self {
        Self {
            vocabulary,
            buffer: String::new(),
            cursor: 0,
            suggestions: Suggestions::default(),
            history_index: None,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in chars from the start of the buffer.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    pub fn history_index(&self) -> Option<usize> {
        self.history_index
    }

    pub fn state(&self) -> InterpreterState {
        if self.history_index.is_some() {
            InterpreterState::BrowsingHistory
        } else if self.suggestions.is_visible() && self.suggestions.highlighted().is_some() {
            InterpreterState::BrowsingSuggestions
        } else {
            InterpreterState::Editing
        }
    }

    /// Feed one keystroke. Returns a submission when the key was Enter.
    pub fn handle_key(&mut self, key: Key, history: &History) -> Option<Submission> {
        if !matches!(key, Key::Up | Key::Down) {
            self.history_index = None;
        }

        match key {
            Key::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
                self.buffer_changed();
            }
            Key::Backspace => {
                if self.cursor > 0 {
                    let at = self.byte_offset(self.cursor - 1);
                    self.buffer.remove(at);
                    self.cursor -= 1;
                    self.buffer_changed();
                }
            }
            Key::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                    self.buffer_changed();
                }
            }
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.char_len(),
            Key::Up => self.move_up(history),
            Key::Down => self.move_down(history),
            Key::Tab => self.accept(),
            Key::Esc => self.suggestions.dismiss(),
            Key::Enter => return Some(self.submit(history)),
        }
        None
    }

    fn move_up(&mut self, history: &History) {
        if self.suggestions.is_visible() {
            self.suggestions.cycle_back();
            return;
        }
        if history.is_empty() {
            return;
        }
        let next = match self.history_index {
            None => 0,
            Some(idx) => (idx + 1).min(history.len() - 1),
        };
        self.recall(history, next);
    }

    fn move_down(&mut self, history: &History) {
        if self.suggestions.is_visible() {
            self.suggestions.cycle_forward();
            return;
        }
        match self.history_index {
            None => {}
            Some(0) => {
                self.history_index = None;
                self.set_buffer(String::new());
            }
            Some(idx) => self.recall(history, idx - 1),
        }
    }

    fn recall(&mut self, history: &History, steps_back: usize) {
        if let Some(entry) = history.recall(steps_back) {
            self.history_index = Some(steps_back);
            self.set_buffer(entry.to_string());
        }
    }

    fn accept(&mut self) {
        if !self.suggestions.is_visible() {
            return;
        }
        if let Some(choice) = self.suggestions.accept_target().map(str::to_string) {
            self.set_buffer(choice);
            self.buffer_changed();
        }
    }

    fn submit(&mut self, history: &History) -> Submission {
        let command = match self.suggestions.highlighted_item() {
            Some(item) if self.suggestions.is_visible() => item.to_string(),
            _ => std::mem::take(&mut self.buffer),
        };

        self.set_buffer(String::new());
        self.suggestions.clear();
        self.history_index = None;

        let history = if command.trim().is_empty() {
            None
        } else {
            Some(history.with(&command))
        };
        Submission { command, history }
    }

    /// Replace the buffer without touching suggestions. Cursor goes to the end.
    fn set_buffer(&mut self, text: String) {
        self.buffer = text;
        self.cursor = self.char_len();
    }

    fn buffer_changed(&mut self) {
        self.suggestions.refresh(self.vocabulary, &self.buffer);
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}
