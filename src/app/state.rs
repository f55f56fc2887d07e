//! Central application state.
//!
//! Rendering reads `&AppState`, event handling mutates `&mut AppState`.

use std::rc::Rc;

use crate::config::AppConfig;
use crate::core::{deck::Deck, page::Page, window::Window};
use crate::ui::smooth_scroll::SmoothScroll;

pub struct AppState {
    /// The mounted page, which owns the window it scrolls.
    pub page: Page,
    /// Eases the window offset toward the input target.
    pub smooth: SmoothScroll,
    pub config: AppConfig,
    /// Show geometry overlays on sections flagged for debugging.
    pub show_debug: bool,
    pub should_quit: bool,
    /// Transient message for the status bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Mount `deck` on a fresh window of `viewport_rows` rows.
    pub fn new(deck: Deck, config: AppConfig, viewport_rows: u16) -> Self {
        let window = Rc::new(Window::new(f64::from(viewport_rows)));
        let page = Page::mounted(window, deck);
        let smooth = SmoothScroll::new(config.smooth_speed, config.smooth_scroll);
        Self {
            page,
            smooth,
            config,
            show_debug: true,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn window(&self) -> &Window {
        self.page.window()
    }

    /// Viewport height in whole rows.
    pub fn viewport_rows(&self) -> u16 {
        self.window().viewport_height().round().clamp(0.0, f64::from(u16::MAX)) as u16
    }
}
