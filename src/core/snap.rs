//! Snap points and the release-time snap resolver.

use super::error::{ConfigError, Result};

/// Release speed (position units per millisecond) above which a release
/// counts as a flick.
pub const FLICK_THRESHOLD: f64 = 0.7;

/// Validated, strictly ascending list of open fractions in `(0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPoints(Vec<f64>);

impl SnapPoints {
    pub const DEFAULT: &'static [f64] = &[0.1, 0.5, 0.9];

    pub fn new(points: Vec<f64>) -> Result<Self> {
        if points.is_empty() {
            return Err(ConfigError::EmptySnapPoints);
        }
        for (index, &value) in points.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                return Err(ConfigError::SnapPointOutOfRange { index, value });
            }
            if index > 0 && value <= points[index - 1] {
                return Err(ConfigError::SnapPointsNotAscending { index });
            }
        }
        Ok(Self(points))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn last_index(&self) -> usize {
        self.0.len() - 1
    }

    /// The "half" button target.
    pub fn half_index(&self) -> usize {
        self.0.len() / 2
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Top-edge position of snap `index` for a viewport of `height`.
    /// Out-of-range indices clamp to the last snap point.
    pub fn position_of(&self, index: usize, height: f64) -> f64 {
        let fraction = self.0[index.min(self.last_index())];
        height * (1.0 - fraction)
    }

    /// Index of the point closest to `open_percent`; ties go to the lower index.
    pub fn nearest(&self, open_percent: f64) -> usize {
        let mut best = 0;
        let mut best_dist = (open_percent - self.0[0]).abs();
        for (i, &point) in self.0.iter().enumerate().skip(1) {
            let dist = (open_percent - point).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }

    /// Choose the resting index for a release at `open_percent` moving at
    /// `velocity` (positive = downward, towards lower indices).
    pub fn resolve(&self, open_percent: f64, velocity: f64) -> usize {
        let nearest = self.nearest(open_percent);
        if velocity.abs() <= FLICK_THRESHOLD {
            return nearest;
        }
        if velocity > 0.0 {
            nearest.saturating_sub(1)
        } else {
            (nearest + 1).min(self.last_index())
        }
    }
}

impl Default for SnapPoints {
    fn default() -> Self {
        Self(Self::DEFAULT.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn demo() -> SnapPoints {
        SnapPoints::new(vec![0.05, 0.3, 0.6, 0.92]).unwrap()
    }

    #[test]
    fn rejects_bad_lists() {
        assert_eq!(SnapPoints::new(vec![]), Err(ConfigError::EmptySnapPoints));
        assert_eq!(
            SnapPoints::new(vec![0.5, 0.5]),
            Err(ConfigError::SnapPointsNotAscending { index: 1 })
        );
        assert_eq!(
            SnapPoints::new(vec![0.6, 0.2]),
            Err(ConfigError::SnapPointsNotAscending { index: 1 })
        );
        assert!(matches!(
            SnapPoints::new(vec![0.0, 0.5]),
            Err(ConfigError::SnapPointOutOfRange { index: 0, .. })
        ));
        assert!(matches!(
            SnapPoints::new(vec![0.5, 1.2]),
            Err(ConfigError::SnapPointOutOfRange { index: 1, .. })
        ));
        assert!(matches!(
            SnapPoints::new(vec![f64::NAN]),
            Err(ConfigError::SnapPointOutOfRange { .. })
        ));
        assert!(SnapPoints::new(vec![1.0]).is_ok());
    }

    #[test]
    fn half_index_floors() {
        assert_eq!(demo().half_index(), 2);
        assert_eq!(SnapPoints::default().half_index(), 1);
        assert_eq!(SnapPoints::new(vec![0.4]).unwrap().half_index(), 0);
    }

    #[test]
    fn exact_tie_goes_to_lower_point() {
        let points = SnapPoints::new(vec![0.25, 0.75]).unwrap();
        assert_eq!(points.nearest(0.5), 0);
    }

    #[test]
    fn flick_down_from_between_points() {
        // 0.44 is nearer 0.3 (index 1); a downward flick goes one further.
        assert_eq!(demo().resolve(0.44, 0.9), 0);
        assert_eq!(demo().resolve(0.44, 0.0), 1);
    }

    #[test]
    fn flick_clamps_at_ends() {
        assert_eq!(demo().resolve(0.02, 5.0), 0);
        assert_eq!(demo().resolve(0.99, -5.0), 3);
    }

    #[test]
    fn velocity_at_threshold_is_not_a_flick() {
        assert_eq!(demo().resolve(0.6, FLICK_THRESHOLD), 2);
        assert_eq!(demo().resolve(0.6, -FLICK_THRESHOLD), 2);
    }

    fn snap_list() -> impl Strategy<Value = SnapPoints> {
        prop::collection::btree_set(1u32..=1000, 1..8).prop_map(|set| {
            SnapPoints::new(set.into_iter().map(|v| v as f64 / 1000.0).collect()).unwrap()
        })
    }

    proptest! {
        #[test]
        fn slow_release_picks_nearest(points in snap_list(), p in 0.0f64..=1.0) {
            let idx = points.resolve(p, 0.0);
            let best = (p - points.as_slice()[idx]).abs();
            for (i, &s) in points.as_slice().iter().enumerate() {
                let d = (p - s).abs();
                prop_assert!(best <= d);
                if i < idx {
                    prop_assert!(d > best, "lower index {} ties with {}", i, idx);
                }
            }
        }

        #[test]
        fn flick_moves_one_step(
            points in snap_list(),
            p in 0.0f64..=1.0,
            speed in 0.7001f64..20.0,
            down in any::<bool>(),
        ) {
            let nearest = points.nearest(p);
            let velocity = if down { speed } else { -speed };
            let idx = points.resolve(p, velocity);
            let expected = if down {
                nearest.saturating_sub(1)
            } else {
                (nearest + 1).min(points.last_index())
            };
            prop_assert_eq!(idx, expected);
        }
    }
}
