//! Roster fetch indicator, drawn right-aligned on the header row.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

const DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Shown while a roster load is in flight.  `reloading` switches the
/// label once cards are already on screen.
pub struct LoadingIndicator {
    pub visible: bool,
    pub reloading: bool,
    pub tick: u64,
}

impl LoadingIndicator {
    fn label(&self) -> String {
        let dot = DOTS[(self.tick % DOTS.len() as u64) as usize];
        if self.reloading {
            format!(" {dot} refreshing roster ")
        } else {
            format!(" {dot} loading staff ")
        }
    }
}

impl Widget for LoadingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.height == 0 {
            return;
        }
        let label = self.label();
        let width = label.chars().count() as u16;
        if area.width <= width {
            return;
        }
        let x = area.right() - width - 1;
        let line = Line::from(Span::styled(label, Theme::loading_style()));
        buf.set_line(x, area.y, &line, width);
    }
}
