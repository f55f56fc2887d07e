//! Renders the visible slice of a [`Page`]: section backgrounds, sticky
//! slide content with the scaled heading, and optional debug overlays.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::core::page::Page;
use crate::core::slide::{Slide, SlideFrame};

use super::debug_overlay::DebugOverlay;
use super::theme::Theme;

/// Rows of `area` covered by a span starting `top` rows below the viewport
/// top and `height` rows tall.  `None` when nothing is visible.
pub fn visible_rows(area: Rect, top: f64, height: f64) -> Option<Rect> {
    let start = top.round().max(0.0);
    let end = (top + height).round().min(f64::from(area.height));
    if !(end > start) {
        return None;
    }
    let start = start as u16;
    let end = end as u16;
    Some(Rect::new(area.x, area.y + start, area.width, end - start))
}

/// Top of sticky content inside a section: pinned to the viewport top while
/// the section spans it, otherwise travelling with the section edge.
pub fn sticky_top(client_top: f64, section_height: f64, viewport_height: f64) -> f64 {
    let bottom = client_top + section_height;
    client_top.max((bottom - viewport_height).min(0.0))
}

pub struct PageWidget<'a> {
    page: &'a Page,
    show_debug: bool,
}

impl<'a> PageWidget<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self {
            page,
            show_debug: false,
        }
    }

    pub fn show_debug(mut self, show: bool) -> Self {
        self.show_debug = show;
        self
    }
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let window = self.page.window();
        let scroll = window.scroll_y();
        let viewport = f64::from(area.height);

        for section in self.page.sections() {
            let Some(placement) = section.element_box() else {
                continue;
            };
            let client_top = placement.top - scroll;
            let Some(section_rows) = visible_rows(area, client_top, placement.height) else {
                continue;
            };
            let config = section.config();
            buf.set_style(section_rows, Theme::section_style(&config.class_name));

            let content_top = sticky_top(client_top, placement.height, viewport);
            if let Some(content_rows) = visible_rows(area, content_top, viewport) {
                let clip = content_rows.intersection(section_rows);
                if !clip.is_empty() {
                    SlideWidget::new(&section.slide(), &config.class_name).render(clip, buf);
                }
            }

            if self.show_debug && config.debug {
                let overlay = DebugOverlay {
                    class_name: &config.class_name,
                    top_abs: placement.top,
                    height: placement.height,
                    scroll,
                    progress: section.progress().get(),
                };
                overlay.render(section_rows, buf);
            }
        }
    }
}

// ───────────────────────────────────────── slide ─────────────

/// One slide: a heading box scaled by progress, then the transform and the
/// two-decimal readout.
pub struct SlideWidget<'a> {
    text: &'a str,
    class_name: &'a str,
    frame: SlideFrame,
}

impl<'a> SlideWidget<'a> {
    pub fn new(slide: &'a Slide, section_class: &'a str) -> Self {
        Self {
            text: &slide.content().text,
            class_name: section_class,
            frame: slide.frame(),
        }
    }

    /// Heading box size at the current scale: one row and the padded text
    /// width at scale 1, growing linearly in both directions.
    pub fn heading_size(&self) -> (u16, u16) {
        let base_w = Line::raw(self.text).width() as f64 + 4.0;
        let w = (base_w * self.frame.scale).round();
        let h = self.frame.scale.round();
        (w.clamp(1.0, f64::from(u16::MAX)) as u16, h.clamp(1.0, f64::from(u16::MAX)) as u16)
    }
}

impl Widget for SlideWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (w, h) = self.heading_size();
        let w = w.min(area.width);
        let h = h.min(area.height);
        // Heading, one blank row, readout, transform.
        let block_h = (h + 3).min(area.height);
        let top = area.y + (area.height - block_h) / 2;
        let heading = Rect::new(area.x + (area.width - w) / 2, top, w, h);

        buf.set_style(heading, Theme::heading_style(self.class_name));
        let text_row = Rect::new(heading.x, heading.y + h / 2, heading.width, 1);
        Paragraph::new(Line::from(Span::styled(
            self.text,
            Theme::heading_style(self.class_name),
        )))
        .alignment(Alignment::Center)
        .render(text_row, buf);

        let below = heading.y + h + 1;
        let lines = [
            (below, self.frame.readout.as_str()),
            (below + 1, self.frame.transform.as_str()),
        ];
        for (y, text) in lines {
            if y >= area.y + area.height {
                break;
            }
            Paragraph::new(Line::from(Span::styled(text, Theme::readout_style())))
                .alignment(Alignment::Center)
                .render(Rect::new(area.x, y, area.width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::core::deck::Deck;
    use crate::core::window::Window;

    fn page(rows: f64) -> Page {
        let deck = Deck::default().with_heading("Hi");
        Page::mounted(Rc::new(Window::new(rows)), deck)
    }

    fn render(page: &Page, width: u16, height: u16, debug: bool) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        PageWidget::new(page).show_debug(debug).render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn screen(buf: &Buffer) -> String {
        (0..buf.area.height).map(|y| row(buf, y)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn visible_rows_clips_to_viewport() {
        let area = Rect::new(0, 2, 10, 20);
        assert_eq!(visible_rows(area, -5.0, 10.0), Some(Rect::new(0, 2, 10, 5)));
        assert_eq!(visible_rows(area, 15.0, 10.0), Some(Rect::new(0, 17, 10, 5)));
        assert_eq!(visible_rows(area, 20.0, 10.0), None);
        assert_eq!(visible_rows(area, -10.0, 10.0), None);
        assert_eq!(visible_rows(area, 3.0, 0.0), None);
    }

    #[test]
    fn content_sticks_while_section_spans_viewport() {
        // 80-row section, 20-row viewport.
        assert_eq!(sticky_top(5.0, 80.0, 20.0), 5.0);
        assert_eq!(sticky_top(-30.0, 80.0, 20.0), 0.0);
        assert_eq!(sticky_top(-70.0, 80.0, 20.0), -10.0);
    }

    #[test]
    fn first_slide_at_rest() {
        let p = page(20.0);
        let buf = render(&p, 40, 20, false);
        let text = screen(&buf);
        assert!(text.contains("Hi"));
        assert!(text.contains("0.00"));
        assert!(text.contains("scale(1)"));
        assert_eq!(buf[(0, 0)].bg, Theme::section_bg("one"));
    }

    #[test]
    fn halfway_through_first_slide() {
        let p = page(20.0);
        // First section is 160 rows tall.
        p.window().scroll_to(80.0);
        let text = screen(&render(&p, 40, 20, false));
        assert!(text.contains("0.50"));
        assert!(text.contains("scale(2)"));
    }

    #[test]
    fn heading_grows_with_progress() {
        let p = page(20.0);
        let slide = p.sections()[0].slide();
        let at_rest = SlideWidget::new(&slide, "one").heading_size();
        assert_eq!(at_rest, (6, 1));

        p.window().scroll_to(160.0);
        let slide = p.sections()[0].slide();
        assert_eq!(SlideWidget::new(&slide, "one").heading_size(), (18, 3));
    }

    #[test]
    fn boundary_between_sections() {
        let p = page(20.0);
        // Section two starts 10 rows below the viewport top.
        p.window().scroll_to(150.0);
        let buf = render(&p, 40, 20, false);
        assert_eq!(buf[(0, 9)].bg, Theme::section_bg("one"));
        assert_eq!(buf[(0, 10)].bg, Theme::section_bg("two"));
    }

    #[test]
    fn debug_overlay_only_when_enabled() {
        let p = page(20.0);
        p.window().scroll_to(160.0);
        assert!(!screen(&render(&p, 60, 20, false)).contains("debug"));
        let text = screen(&render(&p, 60, 20, true));
        assert!(text.contains("debug two"));
        assert!(text.contains("top_abs"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let p = page(1.0);
        let _ = render(&p, 3, 1, true);
        let _ = render(&p, 0, 0, true);
    }
}
