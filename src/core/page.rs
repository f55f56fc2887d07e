//! Page assembly: one tracker, a stack of sections laid out top to bottom.

use std::rc::Rc;

use super::deck::Deck;
use super::scroll::ScrollTracker;
use super::section::ViewportSection;
use super::window::{ElementBox, Window};

pub struct Page {
    window: Rc<Window>,
    tracker: ScrollTracker,
    sections: Vec<ViewportSection>,
}

impl Page {
    pub fn new(window: Rc<Window>, deck: Deck) -> Self {
        let sections = deck.sections.into_iter().map(ViewportSection::new).collect();
        Self {
            window,
            tracker: ScrollTracker::new(),
            sections,
        }
    }

    /// Build and mount in one step.
    pub fn mounted(window: Rc<Window>, deck: Deck) -> Self {
        let mut page = Self::new(window, deck);
        page.mount();
        page
    }

    /// Activate the tracker, mount every section, lay them out.
    ///
    /// The tracker goes first so that its offset is current before any
    /// calculator takes its initial measurement.
    pub fn mount(&mut self) {
        self.tracker.activate(&self.window);
        for section in &mut self.sections {
            section.mount(&self.window, &self.tracker);
        }
        self.relayout();
        tracing::debug!(sections = self.sections.len(), "page mounted");
    }

    /// Tear down in reverse mount order.
    pub fn unmount(&mut self) {
        for section in self.sections.iter_mut().rev() {
            section.unmount();
        }
        self.tracker.deactivate();
        tracing::debug!(
            elements = self.window.element_count(),
            scroll_listeners = self.window.scroll_listener_count(),
            progress_observers = self.tracker.observer_count(),
            "page unmounted"
        );
    }

    /// Stack sections from the document top, size the document, and refresh
    /// every calculator against the (possibly re-clamped) offset.
    pub fn relayout(&self) {
        let mut top = 0.0;
        for section in &self.sections {
            top += section.layout(top);
        }
        self.window.set_document_height(top);

        let scroll = self.tracker.offset();
        for section in &self.sections {
            section.refresh(scroll);
        }
        tracing::debug!(
            document_height = self.window.document_height(),
            viewport_height = self.window.viewport_height(),
            "page laid out"
        );
    }

    /// Resize the viewport and lay out again.
    pub fn resize(&self, viewport_height: f64) {
        self.window.resize(viewport_height);
        self.relayout();
    }

    pub fn window(&self) -> &Rc<Window> {
        &self.window
    }

    pub fn sections(&self) -> &[ViewportSection] {
        &self.sections
    }

    /// Absolute top of every mounted section, in order.
    pub fn section_starts(&self) -> Vec<f64> {
        self.sections
            .iter()
            .filter_map(ViewportSection::element_box)
            .map(|b: ElementBox| b.top)
            .collect()
    }

    /// First section start strictly below the current offset.
    pub fn next_section_start(&self) -> Option<f64> {
        let scroll = self.window.scroll_y();
        self.section_starts()
            .into_iter()
            .find(|&top| top > scroll + 0.5)
    }

    /// Last section start strictly above the current offset.
    pub fn prev_section_start(&self) -> Option<f64> {
        let scroll = self.window.scroll_y();
        self.section_starts()
            .into_iter()
            .rev()
            .find(|&top| top < scroll - 0.5)
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.unmount();
    }
}
