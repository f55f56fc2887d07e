//! Slide content: turns a section's progress into a heading scale and a
//! numeric readout.

use super::progress::ProgressHandle;

/// Static description of a slide's content.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideContent {
    /// Heading text.
    pub text: String,
    /// Styling identity of the content block.
    pub class_name: String,
}

impl SlideContent {
    pub fn new(text: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class_name: class_name.into(),
        }
    }
}

/// Everything the renderer needs for one slide at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideFrame {
    pub progress: f64,
    /// Heading scale factor, `progress * 2 + 1`.
    pub scale: f64,
    /// CSS-style transform, e.g. `scale(2)`.
    pub transform: String,
    /// Progress to two decimals, e.g. `0.50`.
    pub readout: String,
}

impl SlideFrame {
    pub fn from_progress(progress: f64) -> Self {
        let scale = scale_for(progress);
        Self {
            progress,
            scale,
            transform: format!("scale({scale})"),
            readout: format!("{progress:.2}"),
        }
    }
}

pub fn scale_for(progress: f64) -> f64 {
    progress * 2.0 + 1.0
}

/// A slide bound to the progress of its enclosing section.
#[derive(Debug, Clone)]
pub struct Slide {
    content: SlideContent,
    progress: ProgressHandle,
}

impl Slide {
    pub fn new(content: SlideContent, progress: ProgressHandle) -> Self {
        Self { content, progress }
    }

    pub fn content(&self) -> &SlideContent {
        &self.content
    }

    pub fn frame(&self) -> SlideFrame {
        SlideFrame::from_progress(self.progress.get())
    }
}
