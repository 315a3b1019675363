//! Card lane widget — paints the marquee's current order shifted left by
//! the scroll offset, and records the geometry it actually drew.
//!
//! Each card is first rendered into its own scratch buffer and then copied
//! column by column into the frame, so cards that straddle either edge of
//! the track are clipped cleanly.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::core::{geometry::LaneMetrics, roster::StaffMember};

use super::layout::CardSize;
use super::theme::Theme;

/// The lane widget — created fresh each frame.
pub struct MarqueeLane<'a> {
    cards: Vec<&'a StaffMember>,
    /// Cells scrolled since the last rotation.
    offset: f64,
    /// `Some((count, tick))` while the roster is still loading.
    placeholders: Option<(usize, u64)>,
    photo_base: Option<&'a str>,
}

impl<'a> MarqueeLane<'a> {
    pub fn new(cards: impl IntoIterator<Item = &'a StaffMember>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            offset: 0.0,
            placeholders: None,
            photo_base: None,
        }
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Show `count` skeleton cards instead of the real ones.
    pub fn loading(mut self, count: usize, tick: u64) -> Self {
        self.placeholders = Some((count, tick));
        self
    }

    pub fn photo_base(mut self, base: Option<&'a str>) -> Self {
        self.photo_base = base;
        self
    }
}

impl StatefulWidget for MarqueeLane<'_> {
    type State = LaneMetrics;

    fn render(self, area: Rect, buf: &mut Buffer, metrics: &mut LaneMetrics) {
        let size = CardSize::for_viewport(area.width);
        metrics.gap = size.gap;
        metrics.first_card_width = None;

        if area.width == 0 || area.height == 0 {
            return;
        }
        let pitch = i64::from(size.width) + i64::from(size.gap);

        if let Some((count, tick)) = self.placeholders {
            for i in 0..count {
                let x = i as i64 * pitch;
                if x >= i64::from(area.width) {
                    break;
                }
                let bright = (tick + i as u64) % 2 == 0;
                let card = skeleton_card(size.width, area.height, bright);
                blit(&card, x, area, buf);
            }
            return;
        }

        if self.cards.is_empty() {
            let row = Rect {
                y: area.y + area.height / 2,
                height: 1,
                ..area
            };
            Paragraph::new("No staff to show")
                .style(Theme::empty_style())
                .alignment(Alignment::Center)
                .render(row, buf);
            return;
        }

        metrics.first_card_width = Some(size.width);

        let shift = self.offset.max(0.0).floor() as i64;
        for (i, member) in self.cards.iter().enumerate() {
            let x = i as i64 * pitch - shift;
            if x >= i64::from(area.width) {
                break;
            }
            if x + i64::from(size.width) <= 0 {
                continue;
            }
            let card = staff_card(member, size.width, area.height, self.photo_base);
            blit(&card, x, area, buf);
        }
    }
}

/// Render one staff card into a standalone buffer.
fn staff_card(member: &StaffMember, width: u16, height: u16, photo_base: Option<&str>) -> Buffer {
    let rect = Rect::new(0, 0, width, height);
    let mut card = Buffer::empty(rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::card_border_style());
    let inner = block.inner(rect);
    block.render(rect, &mut card);

    let [photo, _, name, description] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .areas(inner);

    match member.photo_url(photo_base) {
        Some(url) => {
            Block::default().style(Theme::photo_style()).render(photo, &mut card);
            let middle = Rect {
                y: photo.y + photo.height.saturating_sub(1) / 2,
                height: 1,
                ..photo
            };
            Paragraph::new(member.initials())
                .alignment(Alignment::Center)
                .render(middle, &mut card);
            if photo.height > 2 {
                let bottom = Rect {
                    y: photo.y + photo.height - 1,
                    height: 1,
                    ..photo
                };
                Paragraph::new(Line::from(url)).render(bottom, &mut card);
            }
        }
        None => {
            Block::default()
                .style(Theme::missing_photo_style())
                .render(photo, &mut card);
            let middle = Rect {
                y: photo.y + photo.height.saturating_sub(1) / 2,
                height: 1,
                ..photo
            };
            Paragraph::new("no photo")
                .alignment(Alignment::Center)
                .render(middle, &mut card);
        }
    }

    Paragraph::new(member.name.as_str())
        .style(Theme::name_style())
        .wrap(Wrap { trim: true })
        .render(name, &mut card);

    let text = member
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or("—");
    Paragraph::new(text)
        .style(Theme::description_style())
        .wrap(Wrap { trim: true })
        .render(description, &mut card);

    card
}

/// Placeholder card shown while loading: a photo block and three text bars.
fn skeleton_card(width: u16, height: u16, bright: bool) -> Buffer {
    let rect = Rect::new(0, 0, width, height);
    let mut card = Buffer::empty(rect);
    let style = Theme::skeleton_style(bright);

    let block = Block::default().borders(Borders::ALL).border_style(style);
    let inner = block.inner(rect);
    block.render(rect, &mut card);

    let text_rows = 4.min(inner.height);
    let photo_rows = inner.height - text_rows;
    for dy in 0..photo_rows {
        card.set_string(inner.x, inner.y + dy, "░".repeat(inner.width as usize), style);
    }

    let bars = [inner.width, inner.width, inner.width * 2 / 3];
    for (row, bar) in bars.iter().enumerate() {
        let y = inner.y + photo_rows + 1 + row as u16;
        if y >= inner.bottom() {
            break;
        }
        card.set_string(inner.x, y, "▒".repeat(*bar as usize), style);
    }

    card
}

/// Copy `card` into `buf` with its left edge at column `x` relative to
/// `area`, clipping whatever falls outside.
fn blit(card: &Buffer, x: i64, area: Rect, buf: &mut Buffer) {
    let rows = card.area.height.min(area.height);
    for cx in 0..card.area.width {
        let tx = x + i64::from(cx);
        if tx < 0 || tx >= i64::from(area.width) {
            continue;
        }
        let tx = area.x + tx as u16;
        for cy in 0..rows {
            if let (Some(src), Some(dst)) = (card.cell((cx, cy)), buf.cell_mut((tx, area.y + cy))) {
                *dst = src.clone();
            }
        }
    }
}
