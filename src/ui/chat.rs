//! Chat pane: message log on top, single-line input at the bottom.

use std::time::Duration;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Buffer, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use tokio::sync::mpsc::UnboundedSender;
use unicode_width::UnicodeWidthStr;

use crate::engine::chat::{reply_to, GREETING_REPLY};
use crate::event::AppEvent;
use crate::interpreter::{CommandInterpreter, History, Key};
use crate::session::{Conversation, Deferred, Sender};

const INPUT_HEIGHT: u16 = 3;
const USER_LABEL: &str = "You:";
const BOT_LABEL: &str = "Assistant:";

pub struct TuiChat {
    input: CommandInterpreter,
    /// The chat prompt keeps no history; the interpreter still wants one.
    no_history: History,
    conversation: Conversation,
    pending: Deferred<AppEvent>,
    /// Replies scheduled but not yet delivered.
    awaiting: usize,
    delay: Duration,
    scroll_offset: usize,
    hint: Option<String>,
    hint_shown: bool,
}

impl TuiChat {
    pub fn new(delay: Duration, sink: UnboundedSender<AppEvent>) -> Self {
        Self {
            input: CommandInterpreter::new(&[]),
            no_history: History::new(),
            conversation: Conversation::new(GREETING_REPLY),
            pending: Deferred::new(sink),
            awaiting: 0,
            delay,
            scroll_offset: 0,
            hint: None,
            hint_shown: false,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn input(&self) -> &str {
        self.input.buffer()
    }

    pub fn awaiting(&self) -> usize {
        self.awaiting
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// The pane came into view. The hint is only offered the first time.
    pub fn on_open(&mut self, hint: String) {
        if !self.hint_shown {
            self.hint_shown = true;
            self.hint = Some(hint);
        }
    }

    /// Feed one editing key. Returns the message text on Enter.
    pub fn handle_key(&mut self, key: Key) -> Option<String> {
        self.hint = None;
        self.input
            .handle_key(key, &self.no_history)
            .map(|submission| submission.command)
    }

    /// Post a user message and schedule the bot's answer.
    ///
    /// Blank messages are dropped. Returns whether anything was sent.
    pub fn send(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.conversation.push_user(text);
        self.pending.schedule(self.delay, AppEvent::ChatReply { text: reply_to(text) });
        self.awaiting += 1;
        self.scroll_offset = 0;
        true
    }

    pub fn on_reply(&mut self, text: String) {
        self.conversation.push_bot(text);
        self.awaiting = self.awaiting.saturating_sub(1);
        self.scroll_offset = 0;
    }

    pub fn scroll(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
    }

    fn history_lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = usize::from(width.max(1));
        let mut lines = Vec::new();

        if let Some(hint) = &self.hint {
            lines.push(Line::styled(
                hint.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            ));
            lines.push(Line::from(""));
        }

        for msg in self.conversation.messages() {
            let (label, style) = match msg.sender {
                Sender::User => (USER_LABEL, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Sender::Bot => (BOT_LABEL, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            };
            lines.push(Line::from(vec![
                Span::styled(label, style),
                Span::raw(" "),
                Span::styled(
                    msg.timestamp.format("%H:%M").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            for raw in msg.text.split('\n') {
                for wrapped in textwrap::wrap(raw, width) {
                    lines.push(Line::from(wrapped.into_owned()));
                }
            }
            lines.push(Line::from(""));
        }

        if self.awaiting > 0 {
            lines.push(Line::from(vec![
                Span::styled(BOT_LABEL, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::styled("...", Style::default().fg(Color::Yellow)),
            ]));
        }
        lines
    }

    fn split(area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(INPUT_HEIGHT)])
            .split(area);
        (chunks[0], chunks[1])
    }

    /// Hardware cursor position for the input line.
    pub fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        let (_, input_area) = Self::split(area);
        let inner = Block::default().borders(Borders::ALL).inner(input_area);
        if inner.width == 0 || inner.height == 0 {
            return None;
        }
        let before: String = self.input.buffer().chars().take(self.input.cursor()).collect();
        let col = before.width().min(usize::from(inner.width.saturating_sub(1)));
        Some((inner.x + col as u16, inner.y))
    }

    pub fn to_plain_text(&self) -> String {
        self.conversation
            .messages()
            .iter()
            .map(|m| {
                let label = match m.sender {
                    Sender::User => USER_LABEL,
                    Sender::Bot => BOT_LABEL,
                };
                format!("{} {}", label, m.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Widget for &TuiChat {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (history_area, input_area) = TuiChat::split(area);

        let lines = self.history_lines(history_area.width);
        let height = usize::from(history_area.height);
        let start = lines
            .len()
            .saturating_sub(height)
            .saturating_sub(self.scroll_offset);
        let visible: Vec<Line> = lines.into_iter().skip(start).take(height).collect();
        Paragraph::new(visible).render(history_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Message (Enter to send) ")
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(input_area);
        block.render(input_area, buf);

        let input = if self.input.buffer().is_empty() {
            Paragraph::new("Type your message here...")
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
        } else {
            Paragraph::new(self.input.buffer().to_string())
        };
        input.render(inner, buf);
    }
}
