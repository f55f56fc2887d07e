//! Scroll progress through a container.
//!
//! `progress = clamp((scroll - top_abs) / height, 0, 1)` where `top_abs` is
//! the container's top edge in document coordinates.  A calculator keeps the
//! last value when its container is not bound to a live element, and reports
//! 0 for containers with no height.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::scroll::ScrollTracker;
use super::subscription::Subscription;
use super::window::{ElementId, Window};

/// Where a container sits in the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerGeometry {
    pub top_abs: f64,
    pub height: f64,
}

impl ContainerGeometry {
    /// Measure `container` in `window` at scroll offset `scroll`.
    ///
    /// `None` when the reference is unbound or points at a removed element.
    pub fn measure(window: &Window, container: &ContainerRef, scroll: f64) -> Option<Self> {
        let id = container.get()?;
        let rect = window.bounding_client_rect(id)?;
        let height = window.client_height(id)?;
        Some(Self {
            top_abs: rect.top + scroll,
            height,
        })
    }

    /// Progress of `scroll` through this container, always in `[0, 1]`.
    pub fn progress_at(&self, scroll: f64) -> f64 {
        progress(scroll, self.top_abs, self.height)
    }
}

/// Normalised advancement of `scroll` through `[top_abs, top_abs + height]`.
pub fn progress(scroll: f64, top_abs: f64, height: f64) -> f64 {
    if !(height > 0.0) || !scroll.is_finite() || !top_abs.is_finite() || !height.is_finite() {
        return 0.0;
    }
    ((scroll - top_abs) / height).clamp(0.0, 1.0)
}

// ───────────────────────────────────────── references ─────────

/// Nullable, shared reference to a container element.
#[derive(Debug, Clone, Default)]
pub struct ContainerRef(Rc<Cell<Option<ElementId>>>);

impl ContainerRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, id: ElementId) {
        self.0.set(Some(id));
    }

    pub fn unbind(&self) {
        self.0.set(None);
    }

    pub fn get(&self) -> Option<ElementId> {
        self.0.get()
    }
}

/// Read-only view of a published progress value.
#[derive(Debug, Clone)]
pub struct ProgressHandle(Rc<Cell<f64>>);

impl ProgressHandle {
    pub fn get(&self) -> f64 {
        self.0.get()
    }
}

// ───────────────────────────────────────── calculator ─────────

#[derive(Debug)]
struct CalcShared {
    value: Rc<Cell<f64>>,
    container: ContainerRef,
}

impl CalcShared {
    /// Recompute and publish.  Leaves the value untouched when the container
    /// cannot be measured.
    fn recompute(&self, window: &Window, scroll: f64) {
        let Some(geometry) = ContainerGeometry::measure(window, &self.container, scroll) else {
            return;
        };
        let value = geometry.progress_at(scroll);
        tracing::trace!(
            top_abs = geometry.top_abs,
            height = geometry.height,
            scroll,
            value,
            "progress recomputed"
        );
        self.value.set(value);
    }
}

/// Computes the progress of one container and publishes it for content.
#[derive(Debug)]
pub struct ProgressCalculator {
    shared: Rc<CalcShared>,
    window: RefCell<Weak<Window>>,
    listener: RefCell<Option<Subscription>>,
}

impl ProgressCalculator {
    pub fn new(container: ContainerRef) -> Self {
        Self {
            shared: Rc::new(CalcShared {
                value: Rc::new(Cell::new(0.0)),
                container,
            }),
            window: RefCell::new(Weak::new()),
            listener: RefCell::new(None),
        }
    }

    /// Establish an initial value, then recompute on every offset the
    /// tracker publishes.
    pub fn activate(&self, window: &Rc<Window>, tracker: &ScrollTracker) {
        *self.window.borrow_mut() = Rc::downgrade(window);

        let weak = Rc::downgrade(window);
        let shared = Rc::clone(&self.shared);
        let listener = tracker.subscribe(move |scroll| {
            if let Some(window) = weak.upgrade() {
                shared.recompute(&window, scroll);
            }
        });
        *self.listener.borrow_mut() = Some(listener);

        self.shared.recompute(window, tracker.offset());
    }

    /// Stop recomputing.  The last value stays published.
    pub fn deactivate(&self) {
        let listener = self.listener.borrow_mut().take();
        if let Some(listener) = listener {
            listener.cancel();
        }
    }

    /// Recompute outside of a scroll event, e.g. after a layout change.
    pub fn refresh(&self, scroll: f64) {
        if let Some(window) = self.window.borrow().upgrade() {
            self.shared.recompute(&window, scroll);
        }
    }

    pub fn handle(&self) -> ProgressHandle {
        ProgressHandle(Rc::clone(&self.shared.value))
    }
}
