//! Scroll Visibility Tracking
//!
//! Decides whether the fixed header is visible from the direction of
//! vertical scroll motion:
//!
//! - moving down by more than the noise threshold hides the header
//! - moving up by more than the noise threshold shows it
//! - any offset under the near-top threshold shows it, whatever the direction
//!
//! The near-top override is evaluated last and wins. Samples within the noise
//! threshold of the last accepted offset are not accepted, so a slow drift
//! accumulates until it crosses the threshold instead of being lost.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default noise threshold in pixels
pub const DEFAULT_NOISE_THRESHOLD_PX: f64 = 5.0;

/// Default near-top threshold in pixels
pub const DEFAULT_NEAR_TOP_PX: f64 = 50.0;

/// Thresholds for the scroll tracker
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrollPolicy {
    /// Deltas whose magnitude is at or below this never flip visibility
    pub noise_threshold: f64,
    /// Offsets strictly below this always show the header
    pub near_top: f64,
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self {
            noise_threshold: DEFAULT_NOISE_THRESHOLD_PX,
            near_top: DEFAULT_NEAR_TOP_PX,
        }
    }
}

impl ScrollPolicy {
    /// Whether an offset sits inside the near-top band
    #[must_use]
    pub fn is_near_top(&self, offset: f64) -> bool {
        offset < self.near_top
    }
}

/// Tracks the last accepted scroll offset and header visibility
#[derive(Clone, Debug)]
pub struct ScrollVisibilityTracker {
    policy: ScrollPolicy,
    last_offset: f64,
    visible: bool,
}

impl ScrollVisibilityTracker {
    /// Create a tracker at the top of the page with the header visible
    #[must_use]
    pub fn new(policy: ScrollPolicy) -> Self {
        Self {
            policy,
            last_offset: 0.0,
            visible: true,
        }
    }

    /// The active thresholds
    #[must_use]
    pub fn policy(&self) -> ScrollPolicy {
        self.policy
    }

    /// Whether the header is currently visible
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last accepted offset
    #[must_use]
    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }

    /// Re-anchor at an offset with the header visible (used at mount)
    pub fn reset_to(&mut self, offset: f64) {
        self.last_offset = sanitize(offset).unwrap_or(0.0);
        self.visible = true;
    }

    /// Apply one scroll sample. Returns true if visibility changed.
    pub fn sample(&mut self, offset: f64) -> bool {
        let Some(offset) = sanitize(offset) else {
            return false;
        };

        let before = self.visible;
        let delta = offset - self.last_offset;

        if delta.abs() > self.policy.noise_threshold {
            self.visible = delta < 0.0;
            self.last_offset = offset;
        }

        if self.policy.is_near_top(offset) {
            self.visible = true;
        }

        let changed = before != self.visible;
        if changed {
            debug!(offset, delta, visible = self.visible, "Header visibility changed");
        }
        changed
    }
}

impl Default for ScrollVisibilityTracker {
    fn default() -> Self {
        Self::new(ScrollPolicy::default())
    }
}

/// Rubber-band overscroll can report negative offsets; treat them as the top.
fn sanitize(offset: f64) -> Option<f64> {
    offset.is_finite().then(|| offset.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(tracker: &mut ScrollVisibilityTracker, offsets: &[f64]) -> Vec<bool> {
        offsets
            .iter()
            .map(|&o| {
                tracker.sample(o);
                tracker.is_visible()
            })
            .collect()
    }

    #[test]
    fn test_down_up_then_near_top() {
        let mut tracker = ScrollVisibilityTracker::default();
        assert_eq!(
            run(&mut tracker, &[0.0, 80.0, 40.0, 20.0]),
            vec![true, false, true, true]
        );
    }

    #[test]
    fn test_small_deltas_do_not_flip() {
        let mut tracker = ScrollVisibilityTracker::default();
        tracker.sample(200.0);
        assert!(!tracker.is_visible());

        // Jitter around 200 never exceeds the threshold
        assert_eq!(
            run(&mut tracker, &[203.0, 198.0, 201.5, 205.0]),
            vec![false, false, false, false]
        );
        assert!((tracker.last_offset() - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_slow_drift_accumulates() {
        let mut tracker = ScrollVisibilityTracker::default();
        tracker.sample(300.0);
        assert!(!tracker.is_visible());

        // Each step is 2px upward; the third crosses the 5px threshold
        assert_eq!(
            run(&mut tracker, &[298.0, 296.0, 294.0]),
            vec![false, false, true]
        );
    }

    #[test]
    fn test_near_top_overrides_direction() {
        let mut tracker = ScrollVisibilityTracker::default();
        tracker.sample(10.0);
        tracker.sample(30.0);
        // Downward motion, but still near the top
        assert!(tracker.is_visible());
    }

    #[test]
    fn test_near_top_wins_inside_noise_band() {
        let mut tracker = ScrollVisibilityTracker::default();
        tracker.sample(52.0);
        assert!(!tracker.is_visible());
        tracker.sample(48.0);
        assert!(tracker.is_visible());
    }

    #[test]
    fn test_zero_threshold_variant() {
        let mut tracker = ScrollVisibilityTracker::new(ScrollPolicy {
            noise_threshold: 0.0,
            near_top: 50.0,
        });
        assert_eq!(
            run(&mut tracker, &[100.0, 101.0, 100.5, 100.5]),
            vec![false, false, true, true]
        );
    }

    #[test]
    fn test_non_finite_and_negative_offsets() {
        let mut tracker = ScrollVisibilityTracker::default();
        tracker.sample(400.0);
        assert!(!tracker.sample(f64::NAN));
        assert!(!tracker.is_visible());

        assert!(tracker.sample(-30.0));
        assert!(tracker.is_visible());
        assert!(tracker.last_offset().abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_to_reanchors() {
        let mut tracker = ScrollVisibilityTracker::default();
        tracker.sample(500.0);
        tracker.reset_to(900.0);
        assert!(tracker.is_visible());
        // Small move from the new anchor does nothing
        tracker.sample(903.0);
        assert!(tracker.is_visible());
    }
}
