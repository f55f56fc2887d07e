//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme. Colours set here propagate everywhere.
pub struct Theme;

impl Theme {
    // ── sections ───────────────────────────────────────────────

    /// Background for a section's styling identity.  Unknown classes cycle
    /// through the palette by a stable hash of the name.
    pub fn section_bg(class_name: &str) -> Color {
        const PALETTE: &[Color] = &[
            Color::Rgb(0x2b, 0x2d, 0x42),
            Color::Rgb(0x8d, 0x99, 0xae),
            Color::Rgb(0xef, 0x23, 0x3c),
            Color::Rgb(0x2a, 0x9d, 0x8f),
            Color::Rgb(0xe9, 0xc4, 0x6a),
            Color::Rgb(0xf4, 0xa2, 0x61),
            Color::Rgb(0x26, 0x46, 0x53),
        ];
        let index = match class_name {
            "one" => 0,
            "two" => 1,
            "three" => 2,
            "four" => 3,
            "five" => 4,
            "six" => 5,
            "seven" => 6,
            other => other.bytes().map(usize::from).sum::<usize>() % PALETTE.len(),
        };
        PALETTE[index]
    }

    pub fn section_style(class_name: &str) -> Style {
        Style::default()
            .bg(Self::section_bg(class_name))
            .fg(Self::heading_fg(class_name))
    }

    /// Heading text; dark on light sections, light on dark ones.
    pub fn heading_style(class_name: &str) -> Style {
        Style::default()
            .bg(Self::section_bg(class_name))
            .fg(Self::heading_fg(class_name))
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    fn heading_fg(class_name: &str) -> Color {
        match Self::section_bg(class_name) {
            Color::Rgb(r, g, b) if u16::from(r) + u16::from(g) + u16::from(b) > 450 => Color::Black,
            _ => Color::White,
        }
    }

    pub fn readout_style() -> Style {
        Style::default().add_modifier(Modifier::DIM)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
