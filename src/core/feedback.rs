//! Visual feedback derived from how far the sheet is open.
//!
//! All values are monotonic in `open_percent`; renderers decide how to show
//! them.

/// Content slides up by this much (position units) as the sheet opens.
pub const CONTENT_TRAVEL: f64 = 30.0;

/// Blur kicks in above this open fraction.
pub const BLUR_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualFeedback {
    pub open_percent: f64,
    pub backdrop_opacity: f64,
    pub shadow_alpha: f64,
    pub blur: bool,
    pub content_opacity: f64,
    pub content_offset: f64,
}

impl VisualFeedback {
    pub fn from_open_percent(open_percent: f64) -> Self {
        let p = if open_percent.is_nan() {
            0.0
        } else {
            open_percent.clamp(0.0, 1.0)
        };
        Self {
            open_percent: p,
            backdrop_opacity: p,
            shadow_alpha: 0.15 + 0.25 * p,
            blur: p > BLUR_THRESHOLD,
            content_opacity: 0.5 + 0.5 * p,
            content_offset: (1.0 - p) * CONTENT_TRAVEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        let closed = VisualFeedback::from_open_percent(0.0);
        assert_eq!(closed.backdrop_opacity, 0.0);
        assert_eq!(closed.shadow_alpha, 0.15);
        assert!(!closed.blur);
        assert_eq!(closed.content_opacity, 0.5);
        assert_eq!(closed.content_offset, CONTENT_TRAVEL);

        let open = VisualFeedback::from_open_percent(1.0);
        assert_eq!(open.backdrop_opacity, 1.0);
        assert_eq!(open.shadow_alpha, 0.4);
        assert!(open.blur);
        assert_eq!(open.content_opacity, 1.0);
        assert_eq!(open.content_offset, 0.0);
    }

    #[test]
    fn rubber_band_overshoot_is_clamped() {
        assert_eq!(VisualFeedback::from_open_percent(1.3).open_percent, 1.0);
        assert_eq!(VisualFeedback::from_open_percent(-0.2).open_percent, 0.0);
    }

    #[test]
    fn monotonic() {
        let mut prev = VisualFeedback::from_open_percent(0.0);
        for i in 1..=100 {
            let next = VisualFeedback::from_open_percent(i as f64 / 100.0);
            assert!(next.backdrop_opacity >= prev.backdrop_opacity);
            assert!(next.shadow_alpha >= prev.shadow_alpha);
            assert!(next.content_opacity >= prev.content_opacity);
            assert!(next.content_offset <= prev.content_offset);
            assert!(next.blur >= prev.blur);
            prev = next;
        }
    }
}
