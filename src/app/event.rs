//! Terminal event abstraction.
//!
//! A blocking reader forwards crossterm events over a channel and emits a
//! `Tick` whenever the terminal stays quiet for one frame, which is what
//! drives smooth scrolling.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

impl AppEvent {
    fn from_crossterm(ev: CtEvent) -> Option<Self> {
        match ev {
            CtEvent::Key(k) => Some(AppEvent::Key(k)),
            CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
            CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Spawn the reader on tokio's blocking pool; it stops once the receiver is
/// dropped.
pub fn spawn_event_reader(frame: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let next = match event::poll(frame) {
            Ok(true) => match event::read() {
                Ok(ev) => AppEvent::from_crossterm(ev),
                Err(err) => {
                    tracing::warn!(%err, "terminal read failed");
                    None
                }
            },
            Ok(false) => Some(AppEvent::Tick),
            Err(err) => {
                tracing::warn!(%err, "terminal poll failed");
                Some(AppEvent::Tick)
            }
        };
        if let Some(app_event) = next {
            if tx.send(app_event).is_err() {
                break;
            }
        }
    });

    rx
}
