//! Input handling. Maps key, mouse and resize events to scroll requests.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::ui::layout::AppLayout;

use super::state::AppState;

pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    tracing::trace!(?action, "key action");
    state.status_message = None;

    let page_rows = f64::from(state.viewport_rows().saturating_sub(1).max(1));
    let step = f64::from(state.config.scroll_step);

    match action {
        Action::Quit => state.should_quit = true,
        Action::ToggleDebug => {
            state.show_debug = !state.show_debug;
            state.status_message = Some(
                if state.show_debug { "Debug overlay on" } else { "Debug overlay off" }.into(),
            );
        }
        Action::ScrollUp => scroll_by(state, -step),
        Action::ScrollDown => scroll_by(state, step),
        Action::PageUp => scroll_by(state, -page_rows),
        Action::PageDown => scroll_by(state, page_rows),
        Action::Top => scroll_to(state, 0.0),
        Action::Bottom => {
            let bottom = state.window().max_scroll();
            scroll_to(state, bottom);
        }
        Action::NextSlide => {
            let target = state
                .page
                .next_section_start()
                .unwrap_or_else(|| state.window().max_scroll());
            scroll_to(state, target);
        }
        Action::PrevSlide => {
            let target = state.page.prev_section_start().unwrap_or(0.0);
            scroll_to(state, target);
        }
    }
}

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let step = f64::from(state.config.wheel_step);
    match mouse.kind {
        MouseEventKind::ScrollDown => scroll_by(state, step),
        MouseEventKind::ScrollUp => scroll_by(state, -step),
        _ => {}
    }
}

/// Re-layout the page for a terminal of `height` rows.
pub fn handle_resize(state: &mut AppState, width: u16, height: u16) {
    let layout = AppLayout::from_area(ratatui::layout::Rect::new(0, 0, width, height));
    let rows = f64::from(layout.page_area.height);
    if rows != state.window().viewport_height() {
        tracing::debug!(rows, "viewport resized");
        state.page.resize(rows);
    }
}

/// Advance smooth scrolling by one frame.
pub fn handle_tick(state: &mut AppState) {
    let AppState { page, smooth, .. } = state;
    smooth.tick(page.window());
}

fn scroll_by(state: &mut AppState, delta: f64) {
    let AppState { page, smooth, .. } = state;
    smooth.scroll_by(page.window(), delta);
}

fn scroll_to(state: &mut AppState, y: f64) {
    let AppState { page, smooth, .. } = state;
    smooth.scroll_to(page.window(), y);
}
