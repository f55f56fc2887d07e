//! Core model – scroll tracking, progress computation, sections and slides.
//!
//! Nothing in this module depends on any TUI or rendering crate.  It is
//! strictly single-threaded: shared state lives in `Rc`/`Cell`/`RefCell`
//! and every recomputation runs synchronously inside a scroll event.

pub mod deck;
pub mod page;
pub mod progress;
pub mod scroll;
pub mod section;
pub mod slide;
pub mod subscription;
pub mod window;
