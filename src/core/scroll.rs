//! Global scroll-offset tracker.
//!
//! The tracker is the single subscriber that turns window scroll events into
//! a published offset.  Anything that needs the offset observes the tracker
//! rather than the window, which fixes the ordering: the offset is stored
//! before a single observer runs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::subscription::{Subscribers, Subscription};
use super::window::Window;

#[derive(Debug, Default)]
struct Published {
    offset: Cell<f64>,
    observers: Subscribers<f64>,
}

impl Published {
    fn publish(&self, offset: f64) {
        self.offset.set(offset);
        self.observers.notify(&offset);
    }
}

/// Observable copy of the window's vertical scroll offset.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    published: Rc<Published>,
    window_listener: RefCell<Option<Subscription>>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample `window` now, then follow its scroll events.
    ///
    /// Re-activating replaces the previous window subscription.
    pub fn activate(&self, window: &Rc<Window>) {
        let weak = Rc::downgrade(window);
        let published = Rc::clone(&self.published);
        let listener = window.add_scroll_listener(move || {
            let offset = weak.upgrade().map_or(0.0, |w| w.scroll_y());
            published.publish(offset);
        });
        // Replace first so a stale listener never fires after this point.
        *self.window_listener.borrow_mut() = Some(listener);

        self.published.publish(window.scroll_y());
        tracing::debug!(offset = self.offset(), "scroll tracker activated");
    }

    /// Stop following scroll events.  The last offset is kept.
    pub fn deactivate(&self) {
        let listener = self.window_listener.borrow_mut().take();
        if let Some(listener) = listener {
            listener.cancel();
            tracing::debug!("scroll tracker deactivated");
        }
    }

    /// Latest published offset.
    pub fn offset(&self) -> f64 {
        self.published.offset.get()
    }

    /// Observe every published offset.  Observers run in registration order.
    pub fn subscribe(&self, observer: impl Fn(f64) + 'static) -> Subscription {
        self.published.observers.subscribe(move |offset| observer(*offset))
    }

    pub fn observer_count(&self) -> usize {
        self.published.observers.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::window::Window;

    fn window() -> Rc<Window> {
        let w = Rc::new(Window::new(100.0));
        w.set_document_height(2000.0);
        w
    }

    #[test]
    fn samples_on_activation() {
        let w = window();
        w.scroll_to(250.0);

        let tracker = ScrollTracker::new();
        assert_eq!(tracker.offset(), 0.0);
        tracker.activate(&w);
        assert_eq!(tracker.offset(), 250.0);
    }

    #[test]
    fn follows_scroll_events() {
        let w = window();
        let tracker = ScrollTracker::new();
        tracker.activate(&w);

        w.scroll_to(40.0);
        assert_eq!(tracker.offset(), 40.0);
        w.scroll_by(60.0);
        assert_eq!(tracker.offset(), 100.0);
    }

    #[test]
    fn observers_see_fresh_offset() {
        let w = window();
        let tracker = Rc::new(ScrollTracker::new());
        tracker.activate(&w);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let t = Rc::clone(&tracker);
        let _obs = tracker.subscribe(move |offset| {
            s.borrow_mut().push((offset, t.offset()));
        });

        w.scroll_to(123.0);
        assert_eq!(*seen.borrow(), vec![(123.0, 123.0)]);
    }

    #[test]
    fn deactivate_releases_window_listener() {
        let w = window();
        let tracker = ScrollTracker::new();
        tracker.activate(&w);
        tracker.activate(&w);
        assert_eq!(w.scroll_listener_count(), 1);

        tracker.deactivate();
        assert_eq!(w.scroll_listener_count(), 0);
        w.scroll_to(500.0);
        assert_eq!(tracker.offset(), 0.0);
    }

    #[test]
    fn drop_releases_window_listener() {
        let w = window();
        {
            let tracker = ScrollTracker::new();
            tracker.activate(&w);
            assert_eq!(w.scroll_listener_count(), 1);
        }
        assert_eq!(w.scroll_listener_count(), 0);
    }
}
