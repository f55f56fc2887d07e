//! Viewport sections: a box sized in viewport heights that scopes one
//! progress calculator to itself.

use std::rc::{Rc, Weak};

use super::progress::{ContainerRef, ProgressCalculator, ProgressHandle};
use super::scroll::ScrollTracker;
use super::slide::{Slide, SlideContent};
use super::window::{ElementBox, ElementId, Window};

/// Options for one section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionConfig {
    /// Content nested inside the section.
    pub content: SlideContent,
    /// Styling identity of the section box.
    pub class_name: String,
    /// Height as a percentage of the viewport height (`100` = one screen).
    pub height_ratio: f64,
    /// Show the geometry overlay for this section.
    pub debug: bool,
}

impl SectionConfig {
    pub fn new(class_name: impl Into<String>, height_ratio: f64, content: SlideContent) -> Self {
        Self {
            content,
            class_name: class_name.into(),
            height_ratio,
            debug: false,
        }
    }

    /// Section height in rows for a viewport of `viewport_height` rows.
    pub fn height_for(&self, viewport_height: f64) -> f64 {
        (self.height_ratio / 100.0 * viewport_height).round().max(0.0)
    }
}

pub struct ViewportSection {
    config: SectionConfig,
    container: ContainerRef,
    calculator: ProgressCalculator,
    mounted: Option<(Weak<Window>, ElementId)>,
}

impl ViewportSection {
    pub fn new(config: SectionConfig) -> Self {
        let container = ContainerRef::new();
        let calculator = ProgressCalculator::new(container.clone());
        Self {
            config,
            container,
            calculator,
            mounted: None,
        }
    }

    pub fn config(&self) -> &SectionConfig {
        &self.config
    }

    /// Create this section's element, bind it, and start tracking progress.
    pub fn mount(&mut self, window: &Rc<Window>, tracker: &ScrollTracker) {
        self.unmount();
        let id = window.create_element();
        self.container.bind(id);
        self.mounted = Some((Rc::downgrade(window), id));
        self.calculator.activate(window, tracker);
        tracing::debug!(class = %self.config.class_name, ?id, "section mounted");
    }

    /// Stop tracking and release the element.  Safe to call repeatedly.
    pub fn unmount(&mut self) {
        let Some((window, id)) = self.mounted.take() else {
            return;
        };
        self.calculator.deactivate();
        self.container.unbind();
        if let Some(window) = window.upgrade() {
            window.remove_element(id);
        }
        tracing::debug!(class = %self.config.class_name, ?id, "section unmounted");
    }

    /// Place the section box at `top` and size it for the window's viewport.
    /// Returns the section height; 0 when unmounted.
    pub fn layout(&self, top: f64) -> f64 {
        let Some((window, id)) = &self.mounted else {
            return 0.0;
        };
        let Some(window) = window.upgrade() else {
            return 0.0;
        };
        let height = self.config.height_for(window.viewport_height());
        window.set_element_box(*id, ElementBox { top, height });
        height
    }

    /// Recompute progress against `scroll` outside of a scroll event.
    pub fn refresh(&self, scroll: f64) {
        self.calculator.refresh(scroll);
    }

    /// Current box in document coordinates.
    pub fn element_box(&self) -> Option<ElementBox> {
        let (window, id) = self.mounted.as_ref()?;
        window.upgrade()?.element_box(*id)
    }

    pub fn progress(&self) -> ProgressHandle {
        self.calculator.handle()
    }

    /// The nested content, wired to this section's progress.
    pub fn slide(&self) -> Slide {
        Slide::new(self.config.content.clone(), self.progress())
    }
}

impl Drop for ViewportSection {
    fn drop(&mut self) {
        self.unmount();
    }
}
