//! What the terminal can offer the sheet: a bell for haptics and a guess at
//! the colour scheme.

use std::io::Write;
use std::time::Duration;

use crate::core::host::Host;

pub struct TerminalHost {
    haptics: bool,
    colorfgbg: Option<String>,
}

impl TerminalHost {
    pub fn new(haptics: bool) -> Self {
        Self {
            haptics,
            colorfgbg: std::env::var("COLORFGBG").ok(),
        }
    }
}

impl Host for TerminalHost {
    fn haptic_pulse(&mut self, duration: Duration) {
        if !self.haptics {
            return;
        }
        tracing::trace!(?duration, "bell");
        let mut err = std::io::stderr();
        if let Err(e) = err.write_all(b"\x07").and_then(|()| err.flush()) {
            tracing::debug!("bell failed: {e}");
        }
    }

    fn prefers_dark(&self) -> Option<bool> {
        self.colorfgbg.as_deref().and_then(colorfgbg_is_dark)
    }
}

/// Interpret `COLORFGBG` (`"fg;bg"` or `"fg;extra;bg"`): the background
/// colour index decides. Dark for 0–6 and 8.
pub fn colorfgbg_is_dark(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(true),
        7 | 9..=15 => Some(false),
        _ => None,
    }
}
