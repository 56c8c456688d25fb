//! Damped spring that carries the sheet to a snap position.
//!
//! Time is measured in reference frames (1/60 s). Each host frame advances
//! the spring by the real elapsed time, split into sub-steps of at most one
//! reference frame, so the motion looks the same at 30, 60 or 144 Hz.

use std::time::Duration;

use super::error::{ConfigError, Result};

/// Length of one integration unit.
pub const REFERENCE_FRAME: Duration = Duration::from_nanos(16_666_667);

/// Settled once the speed is below this (units per reference frame) ...
pub const SETTLE_VELOCITY: f64 = 0.2;
/// ... and the distance to the target is below this.
pub const SETTLE_DISTANCE: f64 = 0.5;

/// Upper bound on simulated time per host frame.
const MAX_FRAMES_PER_TICK: f64 = 4.0;

/// Every sub-step in `(0, 1]` is stable below this stiffness/mass ratio.
pub const MAX_STIFFNESS_RATIO: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    stiffness: f64,
    damping: f64,
    mass: f64,
}

impl SpringParams {
    pub const DEFAULT: SpringParams = SpringParams {
        stiffness: 0.12,
        damping: 0.85,
        mass: 1.0,
    };

    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Result<Self> {
        if !stiffness.is_finite() || stiffness <= 0.0 {
            return Err(ConfigError::InvalidStiffness(stiffness));
        }
        if !damping.is_finite() || damping <= 0.0 || damping >= 1.0 {
            return Err(ConfigError::InvalidDamping(damping));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(ConfigError::InvalidMass(mass));
        }
        let ratio = stiffness / mass;
        if ratio >= MAX_STIFFNESS_RATIO {
            return Err(ConfigError::UnstableSpring {
                ratio,
                limit: MAX_STIFFNESS_RATIO,
            });
        }
        Ok(Self {
            stiffness,
            damping,
            mass,
        })
    }

    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Result of advancing a running spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Still moving; the new position.
    Moving(f64),
    /// Done. The position is exactly the target.
    Settled(f64),
}

/// A running spring. Owning the handle is owning the animation: dropping or
/// cancelling it stops the motion without a settle.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    current: f64,
    velocity: f64,
    target: f64,
    params: SpringParams,
    last_frame: Option<Duration>,
}

impl AnimationHandle {
    pub fn start(from: f64, to: f64, initial_velocity: f64, params: SpringParams) -> Self {
        Self {
            current: from,
            velocity: initial_velocity,
            target: to,
            params,
            last_frame: None,
        }
    }

    pub fn position(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Stop without settling.
    pub fn cancel(self) {
        tracing::trace!(at = self.current, target = self.target, "animation cancelled");
    }

    /// Move the spring to a new frame of reference, e.g. after a viewport
    /// resize. Velocity is scaled with the position.
    pub fn rescale(&mut self, factor: f64) {
        self.current *= factor;
        self.target *= factor;
        self.velocity *= factor;
    }

    /// Advance to host time `now`. The first call is one reference frame;
    /// later calls use the measured gap. Returns `None` when no time passed.
    pub fn tick_at(&mut self, now: Duration) -> Option<Tick> {
        let frames = match self.last_frame {
            None => 1.0,
            Some(last) => {
                let elapsed = now.saturating_sub(last);
                elapsed.as_secs_f64() / REFERENCE_FRAME.as_secs_f64()
            }
        };
        self.last_frame = Some(now);
        if frames <= 0.0 {
            return None;
        }
        Some(self.advance(frames.min(MAX_FRAMES_PER_TICK)))
    }

    /// Advance by `frames` reference frames.
    pub fn advance(&mut self, frames: f64) -> Tick {
        let mut remaining = frames;
        while remaining > 0.0 {
            let dt = remaining.min(1.0);
            self.step(dt);
            remaining -= dt;
            if self.velocity.abs() < SETTLE_VELOCITY
                && (self.target - self.current).abs() < SETTLE_DISTANCE
            {
                self.current = self.target;
                self.velocity = 0.0;
                return Tick::Settled(self.target);
            }
        }
        Tick::Moving(self.current)
    }

    fn step(&mut self, dt: f64) {
        let SpringParams {
            stiffness,
            damping,
            mass,
        } = self.params;
        let force = -stiffness * (self.current - self.target);
        let accel = force / mass;
        let decay = if dt == 1.0 { damping } else { damping.powf(dt) };
        self.velocity = decay * (self.velocity + accel * dt);
        self.current += self.velocity * dt;
    }
}
