//! Capabilities the sheet borrows from whoever hosts it.
//!
//! Everything here is optional for the host: the default methods are silent
//! no-ops, so a host without haptics or a colour-scheme query just skips
//! those features.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Side effects and queries the sheet needs from its environment.
pub trait Host {
    /// Fire-and-forget haptic pulse.
    fn haptic_pulse(&mut self, _duration: Duration) {}

    /// `Some(true)` when the environment prefers a dark colour scheme,
    /// `None` when it cannot tell.
    fn prefers_dark(&self) -> Option<bool> {
        None
    }
}

/// A host that supports nothing.
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

#[cfg(test)]
impl Host for NullHost {}

/// Background scroll lock shared by every sheet of one host.
///
/// The background is locked while at least one guard is alive. Each sheet
/// holds at most one guard, so repeated acquires from the same sheet collapse
/// into one and the lock lifts only after every sheet has released.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Rc<Cell<usize>>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.holders.get() > 0
    }

    pub fn holders(&self) -> usize {
        self.holders.get()
    }

    pub fn acquire(&self) -> ScrollLockGuard {
        self.holders.set(self.holders.get() + 1);
        ScrollLockGuard {
            holders: Rc::clone(&self.holders),
        }
    }
}

/// Releases its share of the scroll lock when dropped.
#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Rc<Cell<usize>>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.holders.set(self.holders.get().saturating_sub(1));
    }
}
