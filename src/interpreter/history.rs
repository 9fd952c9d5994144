//! Submitted command history.
//!
//! The history is owned by whoever hosts the interpreter. The interpreter
//! only reads it and hands back an updated copy after a submission.

/// Maximum number of commands kept in history.
pub const MAX_HISTORY_SIZE: usize = 50;

/// Ordered, de-duplicated list of submitted commands. Index 0 is the oldest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    commands: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Record a submitted command.
    /// Blank commands are skipped. A command already present moves to the end.
    pub fn push(&mut self, cmd: &str) {
        if cmd.trim().is_empty() {
            return;
        }

        self.commands.retain(|existing| existing != cmd);
        self.commands.push(cmd.to_string());

        // Trim history if it exceeds max size
        if self.commands.len() > MAX_HISTORY_SIZE {
            let overflow = self.commands.len() - MAX_HISTORY_SIZE;
            self.commands.drain(..overflow);
        }
    }

    /// Copy of this history with `cmd` recorded.
    pub fn with(&self, cmd: &str) -> Self {
        let mut next = self.clone();
        next.push(cmd);
        next
    }

    /// Entry `steps_back` positions before the newest (0 = newest).
    pub fn recall(&self, steps_back: usize) -> Option<&str> {
        let idx = self.commands.len().checked_sub(steps_back + 1)?;
        self.commands.get(idx).map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
