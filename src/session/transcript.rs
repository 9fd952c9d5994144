//! Scrollback for the terminal-like panes.
//!
//! Entries are only ever appended. The one exception is [`Transcript::clear`],
//! which empties the whole log.

use std::time::Duration;

/// A single command with its response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// The echoed command line. Banner lines have none.
    pub command: Option<String>,
    pub response: String,
    /// Colour name for the response text, if the command asked for one.
    pub color: Option<String>,
    /// How long the typed reveal waits before starting.
    pub reveal_delay: Duration,
}

impl TranscriptEntry {
    pub fn banner(response: impl Into<String>, reveal_delay: Duration) -> Self {
        Self {
            command: None,
            response: response.into(),
            color: None,
            reveal_delay,
        }
    }

    pub fn reply(command: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            response: response.into(),
            color: None,
            reveal_delay: Duration::ZERO,
        }
    }

    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace everything with `entries` (language switch, initial banner).
    pub fn reset(&mut self, entries: Vec<TranscriptEntry>) {
        self.clear();
        self.entries = entries;
    }

    /// Plain-text rendering, one prompt line per command.
    pub fn to_plain_text(&self, prompt: &str) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            if let Some(cmd) = &entry.command {
                out.push_str(prompt);
                out.push(' ');
                out.push_str(cmd);
                out.push('\n');
            }
            out.push_str(&entry.response);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_only() {
        let mut transcript = Transcript::new();
        transcript.push(TranscriptEntry::banner("welcome", Duration::ZERO));
        transcript.push(TranscriptEntry::reply("echo hi", "hi"));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.entries()[0].command, None);
        assert_eq!(transcript.entries()[1].command.as_deref(), Some("echo hi"));
    }

    #[test]
    fn test_clear_empties_regardless_of_length() {
        let mut transcript = Transcript::new();
        for i in 0..25 {
            transcript.push(TranscriptEntry::reply(format!("cmd{}", i), "ok"));
        }
        transcript.clear();
        assert!(transcript.is_empty());

        transcript.clear();
        assert_eq!(transcript.len(), 0);
    }

    #[test]
    fn test_reset_replaces_entries() {
        let mut transcript = Transcript::new();
        transcript.push(TranscriptEntry::reply("ls", "files"));
        transcript.reset(vec![TranscriptEntry::banner("bonjour", Duration::from_secs(1))]);

        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.entries()[0].response, "bonjour");
        assert_eq!(transcript.entries()[0].reveal_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_plain_text() {
        let mut transcript = Transcript::new();
        transcript.push(TranscriptEntry::banner("hello", Duration::ZERO));
        transcript.push(TranscriptEntry::reply("whoami", "guest").with_color(Some("red".into())));

        assert_eq!(transcript.to_plain_text("$"), "hello\n$ whoami\nguest\n");
    }
}
