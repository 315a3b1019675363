//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── cards ──────────────────────────────────────────────────
    pub fn card_border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn photo_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn missing_photo_style() -> Style {
        Style::default()
            .bg(Color::Black)
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn name_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn description_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    /// Skeleton blocks alternate between two shades to shimmer.
    pub fn skeleton_style(bright: bool) -> Style {
        if bright {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn empty_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn loading_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn paused_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}
