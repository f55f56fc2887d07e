//! The host window: scroll offset, viewport, element boxes, scroll events.
//!
//! This is the stand-in for the browser window the page lives in.  One unit
//! of length is one terminal row.  All state sits behind `Cell`/`RefCell`
//! because listeners hold an `Rc<Window>` and read it while a scroll event
//! is being dispatched.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::subscription::{Subscribers, Subscription};

/// Opaque handle to an element box owned by a [`Window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

/// Absolute placement of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementBox {
    pub top: f64,
    pub height: f64,
}

/// Element rectangle relative to the viewport (the `getBoundingClientRect`
/// view): `top` goes negative once the element scrolls past the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Default)]
pub struct Window {
    scroll_y: Cell<f64>,
    viewport_height: Cell<f64>,
    document_height: Cell<f64>,
    next_element: Cell<u64>,
    elements: RefCell<HashMap<ElementId, ElementBox>>,
    scroll_events: Subscribers<()>,
}

impl Window {
    pub fn new(viewport_height: f64) -> Self {
        let window = Self::default();
        window.viewport_height.set(viewport_height.max(0.0));
        window
    }

    // ── scroll state ────────────────────────────────────────────

    /// Current vertical scroll offset.  Zero when nothing is scrollable.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    /// Largest offset the document allows.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height.get() - self.viewport_height.get()).max(0.0)
    }

    /// Scroll to `y` (clamped to the document).  Dispatches a scroll event
    /// when the offset actually changes; returns whether it did.
    ///
    /// The offset is stored before any listener runs.
    pub fn scroll_to(&self, y: f64) -> bool {
        let target = if y.is_finite() {
            y.clamp(0.0, self.max_scroll())
        } else {
            0.0
        };
        if target == self.scroll_y.get() {
            return false;
        }
        self.scroll_y.set(target);
        tracing::trace!(scroll_y = target, "scroll event");
        self.scroll_events.notify(&());
        true
    }

    pub fn scroll_by(&self, dy: f64) -> bool {
        self.scroll_to(self.scroll_y.get() + dy)
    }

    /// Register a scroll-event listener.  It receives no payload; listeners
    /// re-sample [`Window::scroll_y`].
    pub fn add_scroll_listener(&self, listener: impl Fn() + 'static) -> Subscription {
        self.scroll_events.subscribe(move |_| listener())
    }

    pub fn scroll_listener_count(&self) -> usize {
        self.scroll_events.count()
    }

    // ── viewport / document ─────────────────────────────────────

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height.get()
    }

    pub fn document_height(&self) -> f64 {
        self.document_height.get()
    }

    /// Change the viewport height.  Re-clamps the offset, which may fire a
    /// scroll event.
    pub fn resize(&self, viewport_height: f64) {
        self.viewport_height.set(viewport_height.max(0.0));
        self.scroll_to(self.scroll_y.get());
    }

    /// Set the total document height after a layout pass.  Re-clamps the
    /// offset, which may fire a scroll event.
    pub fn set_document_height(&self, height: f64) {
        self.document_height.set(height.max(0.0));
        self.scroll_to(self.scroll_y.get());
    }

    // ── elements ────────────────────────────────────────────────

    /// Create a new, zero-sized element.
    pub fn create_element(&self) -> ElementId {
        let id = ElementId(self.next_element.get());
        self.next_element.set(id.0 + 1);
        self.elements.borrow_mut().insert(id, ElementBox::default());
        id
    }

    pub fn remove_element(&self, id: ElementId) {
        self.elements.borrow_mut().remove(&id);
    }

    /// Place a live element.  Ignored for removed elements.
    pub fn set_element_box(&self, id: ElementId, placement: ElementBox) {
        if let Some(slot) = self.elements.borrow_mut().get_mut(&id) {
            *slot = placement;
        }
    }

    pub fn element_box(&self, id: ElementId) -> Option<ElementBox> {
        self.elements.borrow().get(&id).copied()
    }

    /// Rectangle of `id` relative to the viewport, or `None` if the element
    /// no longer exists.
    pub fn bounding_client_rect(&self, id: ElementId) -> Option<ClientRect> {
        self.element_box(id).map(|b| ClientRect {
            top: b.top - self.scroll_y.get(),
            height: b.height,
        })
    }

    /// Rendered height of `id`.
    pub fn client_height(&self, id: ElementId) -> Option<f64> {
        self.element_box(id).map(|b| b.height)
    }

    pub fn element_count(&self) -> usize {
        self.elements.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn tall_window() -> Window {
        let w = Window::new(100.0);
        w.set_document_height(1000.0);
        w
    }

    #[test]
    fn empty_document_stays_at_zero() {
        let w = Window::new(40.0);
        assert!(!w.scroll_to(25.0));
        assert_eq!(w.scroll_y(), 0.0);
    }

    #[test]
    fn scroll_is_clamped_to_document() {
        let w = tall_window();
        w.scroll_to(5000.0);
        assert_eq!(w.scroll_y(), 900.0);
        w.scroll_by(-10_000.0);
        assert_eq!(w.scroll_y(), 0.0);
        w.scroll_to(f64::NAN);
        assert_eq!(w.scroll_y(), 0.0);
    }

    #[test]
    fn dispatch_only_on_change_and_after_store() {
        let w = Rc::new(tall_window());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&w);
        let s = Rc::clone(&seen);
        let _sub = w.add_scroll_listener(move || {
            if let Some(w) = weak.upgrade() {
                s.borrow_mut().push(w.scroll_y());
            }
        });

        assert!(w.scroll_to(10.0));
        assert!(!w.scroll_to(10.0));
        assert!(w.scroll_by(5.0));
        assert_eq!(*seen.borrow(), vec![10.0, 15.0]);
    }

    #[test]
    fn shrinking_document_reclamps_offset() {
        let w = tall_window();
        w.scroll_to(800.0);
        w.set_document_height(500.0);
        assert_eq!(w.scroll_y(), 400.0);
        w.resize(600.0);
        assert_eq!(w.scroll_y(), 0.0);
    }

    #[test]
    fn client_rect_tracks_scroll() {
        let w = tall_window();
        let id = w.create_element();
        w.set_element_box(id, ElementBox { top: 300.0, height: 200.0 });
        w.scroll_to(350.0);

        let rect = w.bounding_client_rect(id).unwrap();
        assert_eq!(rect.top, -50.0);
        assert_eq!(rect.height, 200.0);
        assert_eq!(w.client_height(id), Some(200.0));

        w.remove_element(id);
        assert_eq!(w.bounding_client_rect(id), None);
        w.set_element_box(id, ElementBox { top: 1.0, height: 1.0 });
        assert_eq!(w.element_count(), 0);
    }
}
