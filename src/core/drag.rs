//! Drag tracking: pointer samples in, one vertical sheet position out.

use std::time::Duration;

use super::snap::SnapPoints;
use super::velocity::VelocityEstimator;

/// Rubber-band factor `k`: excess `e` past a bound shows as roughly `k·√e`.
pub const RUBBER_BAND_FACTOR: f64 = 2.0;

/// Compress an overshoot of `excess` (≥ 0) past a travel bound.
///
/// `k·(√(e + k²/4) − k/2)` has unit slope at zero and grows like `k·√e`, so the
/// result is strictly below `excess` for every positive input.
pub fn rubber_band(excess: f64) -> f64 {
    if excess <= 0.0 {
        return 0.0;
    }
    let k = RUBBER_BAND_FACTOR;
    let half = k / 2.0;
    k * ((excess + half * half).sqrt() - half)
}

/// Clamp `proposed` into `[min, max]` with elastic resistance outside.
pub fn apply_resistance(proposed: f64, min: f64, max: f64) -> f64 {
    if proposed < min {
        min - rubber_band(min - proposed)
    } else if proposed > max {
        max + rubber_band(proposed - max)
    } else {
        proposed
    }
}

/// Live state of one pointer-down gesture.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    start_y: f64,
    start_position: f64,
    position: f64,
    velocity: VelocityEstimator,
}

/// What the resolver gets when the pointer comes up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    pub position: f64,
    pub velocity: f64,
}

#[derive(Debug, Default)]
pub struct DragTracker {
    session: Option<DragSession>,
}

impl DragTracker {
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Start a session. The caller decides whether a drag is allowed at all.
    pub fn begin(&mut self, pointer_y: f64, current_position: f64, at: Duration) {
        self.session = Some(DragSession {
            start_y: pointer_y,
            start_position: current_position,
            position: current_position,
            velocity: VelocityEstimator::new(pointer_y, at),
        });
    }

    /// Move the pointer; returns the new sheet position, or `None` without a
    /// session. Bounds are derived from the snap list and `viewport_height`
    /// at every call so a resize mid-drag is picked up.
    pub fn update(
        &mut self,
        pointer_y: f64,
        at: Duration,
        snaps: &SnapPoints,
        viewport_height: f64,
    ) -> Option<f64> {
        let session = self.session.as_mut()?;
        let min = snaps.position_of(snaps.last_index(), viewport_height);
        let max = snaps.position_of(0, viewport_height);
        let proposed = session.start_position + (pointer_y - session.start_y);
        session.position = apply_resistance(proposed, min, max);
        session.velocity.sample(pointer_y, at);
        Some(session.position)
    }

    /// Finish the session and hand over the last position and velocity.
    pub fn end(&mut self) -> Option<DragRelease> {
        self.session.take().map(|s| DragRelease {
            position: s.position,
            velocity: s.velocity.velocity(),
        })
    }
}
