//! Line-level smooth scroll for the page behind the sheet.
//!
//! When the page's scroll target changes, the jump is turned into a line
//! displacement that decays toward zero each frame, so the text glides
//! instead of snapping.

/// Exponential ease-out scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Current line displacement.  Positive = text still below its target
    /// (scrolling down); negative = still above it.
    line_offset: f64,
    /// Last scroll target seen.
    prev_target: usize,
    /// Fraction of the remaining offset removed per frame.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            line_offset: 0.0,
            prev_target: 0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Feed the current scroll target; a change injects displacement.
    pub fn set_target(&mut self, target: usize) {
        if target != self.prev_target {
            self.line_offset += target as f64 - self.prev_target as f64;
            self.prev_target = target;
        }
    }

    /// Decay the offset toward zero.  Call once per frame.
    pub fn tick(&mut self) {
        self.line_offset *= 1.0 - self.speed;
        if self.line_offset.abs() < 0.4 {
            self.line_offset = 0.0;
        }
    }

    /// First page line to draw, given the logical target.
    pub fn visible_top(&self) -> usize {
        let top = self.prev_target as f64 - self.line_offset.round();
        top.max(0.0) as usize
    }

    pub fn is_animating(&self) -> bool {
        self.line_offset != 0.0
    }
}
