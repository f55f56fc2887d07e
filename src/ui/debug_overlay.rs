//! Geometry overlay for sections flagged for debugging.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

const WIDTH: u16 = 24;
const HEIGHT: u16 = 6;

/// Measurements of one section at the current offset.
pub struct DebugOverlay<'a> {
    pub class_name: &'a str,
    pub top_abs: f64,
    pub height: f64,
    pub scroll: f64,
    pub progress: f64,
}

impl Widget for DebugOverlay<'_> {
    /// Drawn in the top-right corner of `area` (the section's visible rows).
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = anchored_top_right(WIDTH, HEIGHT, area);
        if popup.width < 3 || popup.height < 3 {
            return;
        }
        Clear.render(popup, buf);

        let block = Block::default()
            .title(format!(" debug {} ", self.class_name))
            .title_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White);
        let rows = [
            ("top_abs ", format!("{:.0}", self.top_abs)),
            ("height  ", format!("{:.0}", self.height)),
            ("scroll  ", format!("{:.0}", self.scroll)),
            ("progress", format!("{:.2}", self.progress)),
        ];
        let lines: Vec<Line> = rows
            .into_iter()
            .map(|(name, v)| {
                Line::from(vec![
                    Span::styled(format!(" {name} "), label),
                    Span::styled(v, value),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

/// A `width` × `height` rect in the top-right corner of `area`, shrunk to
/// fit, with one column of margin when there is room.
fn anchored_top_right(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let margin = u16::from(area.width > w);
    let x = area.x + area.width - w - margin;
    Rect::new(x, area.y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_inside_area() {
        let area = Rect::new(0, 5, 80, 10);
        assert_eq!(anchored_top_right(24, 6, area), Rect::new(55, 5, 24, 6));
        let narrow = Rect::new(0, 0, 10, 3);
        assert_eq!(anchored_top_right(24, 6, narrow), Rect::new(0, 0, 10, 3));
    }

    #[test]
    fn prints_measurements() {
        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        DebugOverlay {
            class_name: "two",
            top_abs: 1000.0,
            height: 800.0,
            scroll: 1400.0,
            progress: 0.5,
        }
        .render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("debug two"));
        assert!(text.contains("1000"));
        assert!(text.contains("0.50"));
    }
}
