//! Layout helpers — split the terminal area into regions and pick card
//! dimensions for the current width.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows a card occupies, borders included.
pub const CARD_HEIGHT: u16 = 11;

/// Primary screen layout: header, card track, and a bottom status bar.
pub struct AppLayout {
    pub header_area: Rect,
    pub track_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),           // title + blank line
                Constraint::Length(CARD_HEIGHT), // card track
                Constraint::Min(0),              // breathing room
                Constraint::Length(1),           // status bar
            ])
            .split(area);

        Self {
            header_area: chunks[0],
            track_area: chunks[1],
            status_area: chunks[3],
        }
    }
}

/// Card width and the gap after it, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSize {
    pub width: u16,
    pub gap: u16,
}

impl CardSize {
    /// Breakpoints on the viewport width.  Medium terminals get wider cards
    /// than large ones, where more of them fit side by side.
    pub fn for_viewport(width: u16) -> Self {
        match width {
            0..=79 => Self { width: 28, gap: 2 },
            80..=119 => Self { width: 34, gap: 2 },
            _ => Self { width: 26, gap: 3 },
        }
    }
}
