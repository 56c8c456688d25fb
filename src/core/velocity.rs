//! One-sample-lag vertical velocity estimate.
//!
//! Deliberately unsmoothed: the release velocity is whatever the last two
//! pointer samples say, which keeps flicks responsive.

use std::time::Duration;

/// Smallest denominator used between two samples, in milliseconds.
const MIN_ELAPSED_MS: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
pub struct VelocityEstimator {
    last_y: f64,
    last_at: Duration,
    velocity: f64,
}

impl VelocityEstimator {
    /// Seed the estimator with the drag-start sample.
    pub fn new(y: f64, at: Duration) -> Self {
        Self {
            last_y: y,
            last_at: at,
            velocity: 0.0,
        }
    }

    /// Feed a sample; returns the updated velocity in units per millisecond.
    /// Samples older than the previous one count as zero elapsed time.
    pub fn sample(&mut self, y: f64, at: Duration) -> f64 {
        let elapsed_ms = at.saturating_sub(self.last_at).as_nanos() as f64 / 1e6;
        self.velocity = (y - self.last_y) / elapsed_ms.max(MIN_ELAPSED_MS);
        self.last_y = y;
        self.last_at = at;
        self.velocity
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }
}
