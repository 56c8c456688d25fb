//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.  Frames are driven separately by the main
/// loop, so an idle terminal produces no traffic.
pub fn spawn_event_reader(poll_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        if tx.is_closed() {
            break;
        }
        // Poll with a timeout so a dropped receiver is noticed.
        if !event::poll(poll_interval).unwrap_or(false) {
            continue;
        }
        let Ok(ev) = event::read() else {
            continue;
        };
        let app_event = match ev {
            CtEvent::Key(k) => AppEvent::Key(k),
            CtEvent::Mouse(m) => AppEvent::Mouse(m),
            CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
            _ => continue,
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    rx
}
