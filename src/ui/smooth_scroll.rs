//! Smooth scrolling with exponential ease-out.
//!
//! Input moves a target offset.  Each tick the window offset covers a fixed
//! fraction of the remaining distance, so motion decelerates as it lands.
//! Every step is an ordinary window scroll, i.e. one scroll event.

use crate::core::window::Window;

#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Where the offset is heading; `None` when settled.
    target: Option<f64>,
    /// Fraction of the remaining distance covered per tick.
    speed: f64,
    enabled: bool,
}

impl SmoothScroll {
    pub fn new(speed: f64, enabled: bool) -> Self {
        Self {
            target: None,
            speed: speed.clamp(0.05, 0.95),
            enabled,
        }
    }

    /// Move the target by `delta` rows from wherever it is heading now.
    pub fn scroll_by(&mut self, window: &Window, delta: f64) {
        if !self.enabled {
            self.target = None;
            window.scroll_by(delta);
            return;
        }
        let base = self.target.unwrap_or_else(|| window.scroll_y());
        self.scroll_to(window, base + delta);
    }

    /// Head for `y`.  Jumps straight there when smoothing is off.
    pub fn scroll_to(&mut self, window: &Window, y: f64) {
        let y = y.clamp(0.0, window.max_scroll());
        if self.enabled {
            self.target = Some(y);
        } else {
            self.target = None;
            window.scroll_to(y);
        }
    }

    /// Advance one frame.
    pub fn tick(&mut self, window: &Window) {
        let Some(target) = self.target else {
            return;
        };
        // The document may have shrunk since the target was set.
        let target = target.clamp(0.0, window.max_scroll());
        self.target = Some(target);
        let current = window.scroll_y();
        let remaining = target - current;
        if remaining.abs() < 0.5 {
            window.scroll_to(target);
            self.target = None;
            return;
        }
        // Always move at least one row so short hops do not stall.
        let step = (remaining * self.speed).round();
        let step = if step == 0.0 { remaining.signum() } else { step };
        window.scroll_to(current + step);
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Window {
        let w = Window::new(10.0);
        w.set_document_height(200.0);
        w
    }

    #[test]
    fn disabled_jumps_immediately() {
        let w = window();
        let mut s = SmoothScroll::new(0.3, false);
        s.scroll_by(&w, 25.0);
        assert_eq!(w.scroll_y(), 25.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn eases_toward_target_and_settles() {
        let w = window();
        let mut s = SmoothScroll::new(0.5, true);
        s.scroll_by(&w, 40.0);
        assert_eq!(w.scroll_y(), 0.0);

        s.tick(&w);
        assert_eq!(w.scroll_y(), 20.0);
        s.tick(&w);
        assert_eq!(w.scroll_y(), 30.0);

        for _ in 0..20 {
            s.tick(&w);
        }
        assert_eq!(w.scroll_y(), 40.0);
        assert!(!s.is_animating());
    }

    fn settle(s: &mut SmoothScroll, w: &Window) {
        for _ in 0..100 {
            s.tick(w);
        }
    }

    #[test]
    fn repeated_input_accumulates_on_target() {
        let w = window();
        let mut s = SmoothScroll::new(0.5, true);
        s.scroll_by(&w, 10.0);
        s.scroll_by(&w, 10.0);
        settle(&mut s, &w);
        assert_eq!(w.scroll_y(), 20.0);
    }

    #[test]
    fn target_is_clamped_to_document() {
        let w = window();
        let mut s = SmoothScroll::new(0.5, true);
        s.scroll_by(&w, -50.0);
        settle(&mut s, &w);
        assert_eq!(w.scroll_y(), 0.0);
        assert!(!s.is_animating());

        s.scroll_to(&w, 10_000.0);
        settle(&mut s, &w);
        assert_eq!(w.scroll_y(), 190.0);
    }

    #[test]
    fn shrinking_document_settles_at_new_bottom() {
        let w = window();
        let mut s = SmoothScroll::new(0.5, true);
        s.scroll_to(&w, 150.0);
        s.tick(&w);
        w.set_document_height(60.0);

        settle(&mut s, &w);
        assert_eq!(w.scroll_y(), 50.0);
        assert!(!s.is_animating());

        // Growing back must not resume the old motion.
        w.set_document_height(200.0);
        settle(&mut s, &w);
        assert_eq!(w.scroll_y(), 50.0);
    }
}
