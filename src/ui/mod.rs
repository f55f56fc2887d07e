//! Rendering layer. Everything that touches ratatui widgets lives here.
//!
//! This layer reads the *core* page model and turns it into cells on the
//! terminal.  Scroll state changes only through the core window.

pub mod debug_overlay;
pub mod layout;
pub mod page_widget;
pub mod smooth_scroll;
pub mod theme;
