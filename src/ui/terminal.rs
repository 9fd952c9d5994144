//! Scrollback-plus-prompt widget used by the hero and terminal panes.

use std::time::Duration;

use ratatui::prelude::{Buffer, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use tokio::time::Instant;
use unicode_width::UnicodeWidthStr;

use crate::engine::profile::PROMPT;
use crate::interpreter::{CommandInterpreter, History, Key, Submission};
use crate::session::{Transcript, TranscriptEntry};
use crate::ui::typing::Typewriter;

/// Which entries get the typed reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPolicy {
    /// Every entry types itself out.
    All,
    /// Only the newest `n` entries type; older ones render in full.
    Newest(usize),
}

pub struct TuiTerminal {
    interpreter: CommandInterpreter,
    history: History,
    transcript: Transcript,
    /// One per transcript entry, same order.
    reveals: Vec<Typewriter>,
    policy: RevealPolicy,
    tick: Duration,
    /// Lines scrolled up from the bottom.
    scroll_offset: usize,
}

impl TuiTerminal {
    pub fn new(vocabulary: &'static [&'static str], policy: RevealPolicy, tick: Duration) -> Self {
        Self {
            interpreter: CommandInterpreter::new(vocabulary),
            history: History::new(),
            transcript: Transcript::new(),
            reveals: Vec::new(),
            policy,
            tick,
            scroll_offset: 0,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn set_history(&mut self, history: History) {
        self.history = history;
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Feed one key to the prompt.
    pub fn handle_key(&mut self, key: Key) -> Option<Submission> {
        self.scroll_offset = 0;
        self.interpreter.handle_key(key, &self.history)
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        let reveal = Typewriter::new(&entry.response, Instant::now(), entry.reveal_delay, self.tick);
        self.reveals.push(reveal);
        self.transcript.push(entry);
        self.scroll_offset = 0;
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
        self.reveals.clear();
        self.scroll_offset = 0;
    }

    /// Replace the scrollback with `entries`, all revealing from now.
    pub fn reset(&mut self, entries: Vec<TranscriptEntry>) {
        self.clear();
        for entry in entries {
            self.push(entry);
        }
    }

    pub fn scroll(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
    }

    fn animates(&self, index: usize) -> bool {
        match self.policy {
            RevealPolicy::All => true,
            RevealPolicy::Newest(n) => index + n >= self.reveals.len(),
        }
    }

    /// Some entry is still typing.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.reveals
            .iter()
            .enumerate()
            .any(|(i, r)| self.animates(i) && r.is_running(now))
    }

    /// The text of entry `index` as currently shown.
    pub fn shown_response(&self, index: usize, now: Instant) -> Option<&str> {
        let entry = self.transcript.entries().get(index)?;
        match self.reveals.get(index) {
            Some(reveal) if self.animates(index) => Some(reveal.visible(&entry.response, now)),
            _ => Some(&entry.response),
        }
    }

    /// Every line of content and the row the prompt sits on.
    fn build_lines(&self, width: u16, now: Instant) -> (Vec<Line<'static>>, usize) {
        let width = usize::from(width.max(1));
        let mut lines = Vec::new();

        for (i, entry) in self.transcript.entries().iter().enumerate() {
            if let Some(cmd) = &entry.command {
                lines.push(Line::from(vec![
                    Span::styled(PROMPT, prompt_style()),
                    Span::raw(" "),
                    Span::styled(cmd.clone(), Style::default().fg(Color::Cyan)),
                ]));
            }

            let shown = self.shown_response(i, now).unwrap_or_default();
            let style = entry
                .color
                .as_deref()
                .and_then(parse_color)
                .map(|c| Style::default().fg(c))
                .unwrap_or_else(|| Style::default().fg(Color::Green));
            for raw in shown.split('\n') {
                for wrapped in textwrap::wrap(raw, width) {
                    lines.push(Line::styled(wrapped.into_owned(), style));
                }
            }
        }

        let prompt_row = lines.len();
        lines.push(Line::from(vec![
            Span::styled(PROMPT, prompt_style()),
            Span::raw(" "),
            Span::styled(self.interpreter.buffer().to_string(), Style::default().fg(Color::Cyan)),
        ]));

        let suggestions = self.interpreter.suggestions();
        if suggestions.is_visible() {
            let spans: Vec<Span<'static>> = suggestions
                .items()
                .iter()
                .enumerate()
                .flat_map(|(i, item)| {
                    let style = if suggestions.highlighted() == Some(i) {
                        Style::default().fg(Color::Black).bg(Color::Cyan)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    [Span::styled(item.clone(), style), Span::raw("  ")]
                })
                .collect();
            lines.push(Line::from(spans));
        }

        (lines, prompt_row)
    }

    fn window_start(&self, total: usize, height: usize) -> usize {
        total.saturating_sub(height).saturating_sub(self.scroll_offset)
    }

    /// Hardware cursor position inside `area`, if the prompt is on screen.
    pub fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        let (lines, prompt_row) = self.build_lines(area.width, Instant::now());
        let start = self.window_start(lines.len(), usize::from(area.height));
        let row = prompt_row.checked_sub(start)?;
        if row >= usize::from(area.height) {
            return None;
        }

        let before: String = self
            .interpreter
            .buffer()
            .chars()
            .take(self.interpreter.cursor())
            .collect();
        let col = (PROMPT.width() + 1 + before.width()).min(usize::from(area.width.saturating_sub(1)));
        Some((area.x + col as u16, area.y + row as u16))
    }

    pub fn to_plain_text(&self) -> String {
        self.transcript.to_plain_text(PROMPT)
    }
}

fn prompt_style() -> Style {
    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
}

/// Colour names accepted by the `color` command.
pub fn parse_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "orange" => Some(Color::Rgb(255, 165, 0)),
        "purple" => Some(Color::Rgb(128, 0, 128)),
        other => other.parse().ok(),
    }
}

impl Widget for &TuiTerminal {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (lines, _) = self.build_lines(area.width, Instant::now());
        let start = self.window_start(lines.len(), usize::from(area.height));
        let visible: Vec<Line> = lines.into_iter().skip(start).take(usize::from(area.height)).collect();
        Paragraph::new(visible).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SHELL_VOCABULARY;

    const TICK: Duration = Duration::from_millis(20);

    fn typed(term: &mut TuiTerminal, text: &str) -> Option<Submission> {
        text.chars().for_each(|c| {
            term.handle_key(Key::Char(c));
        });
        term.handle_key(Key::Enter)
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_newest_entries_animate() {
        let mut term = TuiTerminal::new(SHELL_VOCABULARY, RevealPolicy::Newest(2), TICK);
        term.push(TranscriptEntry::reply("a", "first"));
        term.push(TranscriptEntry::reply("b", "second"));
        term.push(TranscriptEntry::reply("c", "third"));

        let now = Instant::now();
        assert_eq!(term.shown_response(0, now), Some("first"));
        assert_eq!(term.shown_response(1, now), Some(""));
        assert_eq!(term.shown_response(2, now), Some(""));
        assert!(term.is_animating(now));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(term.shown_response(2, Instant::now()), Some("third"));
        assert!(!term.is_animating(Instant::now()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_delay_staggers_banner() {
        let mut term = TuiTerminal::new(SHELL_VOCABULARY, RevealPolicy::All, TICK);
        term.reset(vec![
            TranscriptEntry::banner("one", Duration::ZERO),
            TranscriptEntry::banner("two", Duration::from_secs(1)),
        ]);

        tokio::time::advance(Duration::from_millis(500)).await;
        let now = Instant::now();
        assert_eq!(term.shown_response(0, now), Some("one"));
        assert_eq!(term.shown_response(1, now), Some(""));
    }

    #[test]
    fn test_submission_flows_through_history() {
        let mut term = TuiTerminal::new(SHELL_VOCABULARY, RevealPolicy::Newest(2), TICK);
        let submission = typed(&mut term, "echo hi").unwrap();
        assert_eq!(submission.command, "echo hi");
        term.set_history(submission.history.unwrap());
        assert_eq!(term.history().entries(), ["echo hi".to_string()]);
    }

    #[test]
    fn test_clear_drops_reveals() {
        let mut term = TuiTerminal::new(SHELL_VOCABULARY, RevealPolicy::All, TICK);
        term.push(TranscriptEntry::reply("ls", "files"));
        term.clear();
        assert!(term.transcript().is_empty());
        assert_eq!(term.shown_response(0, Instant::now()), None);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("Orange"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(parse_color("not-a-colour"), None);
    }

    #[test]
    fn test_render_shows_prompt_and_suggestions() {
        let mut term = TuiTerminal::new(SHELL_VOCABULARY, RevealPolicy::Newest(2), TICK);
        term.handle_key(Key::Char('h'));

        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        (&term).render(area, &mut buf);

        let rows: Vec<String> = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect();
        assert!(rows[0].starts_with("guest@portfolio:~$ h"));
        assert!(rows[1].contains("help") && rows[1].contains("history"));
        assert_eq!(term.cursor_position(area), Some((20, 0)));
    }
}
