//! User interface module for the TUI application.
//!
//! Each pane is a widget rendered through `&T`; this module draws the frame
//! around them: title, pane tabs and the status bar.

use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::{ActivePane, App};

pub mod chat;
pub mod contact;
pub mod hero;
pub mod layout;
pub mod terminal;
pub mod typing;

const COMMAND_MODE_HINT: &str = "n: next pane  q: quit  l: redraw  g: language  y: copy";
const NORMAL_MODE_HINT: &str = "Ctrl+B: command mode";

fn tabs_line(active: ActivePane) -> Line<'static> {
    let mut spans = Vec::with_capacity(ActivePane::ALL.len() * 2);
    for pane in ActivePane::ALL {
        let label = format!(" {} ", pane.title());
        if pane == active {
            spans.push(Span::styled(
                label,
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, Style::default().fg(Color::Green)));
        }
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn status_line(app: &App) -> Line<'static> {
    if app.get_command_mode() {
        return Line::styled(COMMAND_MODE_HINT, Style::default().fg(Color::Yellow));
    }
    let mut spans = vec![Span::styled(NORMAL_MODE_HINT, Style::default().fg(Color::DarkGray))];
    if let Some(notice) = app.notice() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice.to_string(), Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut title = format!(" termfolio [{}] ", self.get_active_pane().title());
        if self.get_command_mode() {
            title.push_str("[CMD] ");
        }
        let outer_block = Block::new()
            .borders(Borders::all())
            .border_style(Style::default().fg(Color::Green))
            .title(Line::from(title.bold()))
            .title(Line::from(format!(" {} ", self.language().display_name())).right_aligned());
        outer_block.render(area, buf);

        let layout = if self.layout().full_area == area {
            *self.layout()
        } else {
            layout::AppLayout::build(area)
        };

        Paragraph::new(tabs_line(self.get_active_pane())).render(layout.tabs, buf);
        match self.get_active_pane() {
            ActivePane::Hero => self.tui_hero.render(layout.pane, buf),
            ActivePane::Terminal => self.tui_terminal.render(layout.pane, buf),
            ActivePane::Chat => self.tui_chat.render(layout.pane, buf),
            ActivePane::Contact => self.tui_contact.render(layout.pane, buf),
        }
        Paragraph::new(status_line(self)).render(layout.status, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_tabs_highlight_active() {
        let line = tabs_line(ActivePane::Chat);
        let active: Vec<_> = line
            .spans
            .iter()
            .filter(|s| s.style.bg == Some(Color::Green))
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(active, vec![" CHAT ".to_string()]);
    }

    #[test]
    fn test_tabs_render_in_order() {
        let area = Rect::new(0, 0, 50, 1);
        let mut buf = Buffer::empty(area);
        Paragraph::new(tabs_line(ActivePane::Hero)).render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with(" HOME   TERMINAL   CHAT   CONTACT "));
    }
}
