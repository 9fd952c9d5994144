//! Screen areas, computed once per terminal size.

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::widgets::{Block, Borders};

/// Where each part of the frame goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppLayout {
    /// The whole frame, used to detect resizes.
    pub full_area: Rect,
    /// Pane tabs under the top border.
    pub tabs: Rect,
    /// Content of the active pane.
    pub pane: Rect,
    /// Key hints and notices on the last inner row.
    pub status: Rect,
}

impl AppLayout {
    pub fn build(area: Rect) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // tabs
                Constraint::Length(1), // gap
                Constraint::Min(1),    // pane
                Constraint::Length(1), // status
            ])
            .split(inner);

        Self {
            full_area: area,
            tabs: chunks[0],
            pane: chunks[2].inner(Margin { horizontal: 1, vertical: 0 }),
            status: chunks[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_stack_inside_border() {
        let layout = AppLayout::build(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.tabs, Rect::new(1, 1, 78, 1));
        assert_eq!(layout.pane, Rect::new(2, 3, 76, 19));
        assert_eq!(layout.status, Rect::new(1, 22, 78, 1));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let layout = AppLayout::build(Rect::new(0, 0, 3, 3));
        assert!(layout.pane.width <= 3);
    }
}
