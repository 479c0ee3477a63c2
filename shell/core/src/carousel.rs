//! Carousel Synchronization
//!
//! Keeps one rotating slide index consistent across three writers:
//!
//! - the autoplay timer, which advances by one slide per interval
//! - the external tab row, which jumps to an explicit slide
//! - the carousel itself, which reports where a transition actually settled
//!
//! The settle signal is authoritative: a tab selection updates the index
//! optimistically, but if a drag interrupts the transition the settled index
//! replaces it.
//!
//! All index arithmetic is modulo the slide count. An empty carousel never
//! arms its timer and renders nothing.
//!
//! Time is passed in by the caller, so the controller never sleeps and tests
//! can drive it deterministically.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::messages::CarouselSnapshot;

/// Default autoplay interval
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(3000);

/// Default number of slides in view on wide viewports
pub const DEFAULT_SLIDES_TO_SHOW: usize = 3;

/// Errors from index requests
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// The carousel has no slides
    #[error("carousel has no slides")]
    Empty,

    /// Requested index is outside `0..len`
    #[error("slide index {index} out of range for {len} slides")]
    IndexOutOfRange {
        /// The rejected index
        index: usize,
        /// Number of slides
        len: usize,
    },
}

/// What to do with an out-of-range index
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexPolicy {
    /// Reject with [`CarouselError`]
    Strict,
    /// Clamp to the last slide
    Clamp,
}

impl Default for IndexPolicy {
    /// Strict in debug builds, clamping in release builds
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Strict
        } else {
            Self::Clamp
        }
    }
}

impl IndexPolicy {
    /// Resolve a requested index against `len` slides
    ///
    /// `Ok(None)` means the request should be ignored, which is what a
    /// clamping policy does on an empty carousel.
    ///
    /// # Errors
    ///
    /// Under [`IndexPolicy::Strict`], returns [`CarouselError::Empty`] when
    /// there are no slides and [`CarouselError::IndexOutOfRange`] for a bad
    /// index.
    pub fn resolve(self, index: usize, len: usize) -> Result<Option<usize>, CarouselError> {
        if index < len {
            return Ok(Some(index));
        }
        match (self, len) {
            (Self::Strict, 0) => Err(CarouselError::Empty),
            (Self::Strict, _) => Err(CarouselError::IndexOutOfRange { index, len }),
            (Self::Clamp, 0) => Ok(None),
            (Self::Clamp, _) => Ok(Some(len - 1)),
        }
    }
}

/// Responsive override for the number of slides in view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsiveRule {
    /// Applies to widths strictly below this
    pub below_px: u32,
    /// Slides shown at those widths
    pub slides_to_show: usize,
}

/// Carousel configuration
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselConfig {
    /// Whether autoplay runs at all
    pub autoplay: bool,
    /// Time between autoplay ticks
    pub interval: Duration,
    /// Out-of-range handling
    pub index_policy: IndexPolicy,
    /// Slides in view when no responsive rule applies
    pub slides_to_show: usize,
    /// Responsive overrides; the narrowest matching rule wins
    pub responsive: Vec<ResponsiveRule>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            interval: DEFAULT_AUTOPLAY_INTERVAL,
            index_policy: IndexPolicy::default(),
            slides_to_show: DEFAULT_SLIDES_TO_SHOW,
            responsive: vec![
                ResponsiveRule {
                    below_px: 1024,
                    slides_to_show: 2,
                },
                ResponsiveRule {
                    below_px: 640,
                    slides_to_show: 1,
                },
            ],
        }
    }
}

/// Cancellable autoplay deadline
///
/// The timer is a deadline, not a thread: the surface waits until
/// [`AutoplayTimer::deadline`] and then calls back into the controller.
#[derive(Clone, Debug)]
pub struct AutoplayTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl AutoplayTimer {
    /// Create a disarmed timer
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Schedule the next tick at `now + interval`
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Cancel any pending tick
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Pending deadline, if armed
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a tick is pending
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Whether the pending tick is due at `now`
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// Tick interval
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// The carousel controller
#[derive(Clone, Debug)]
pub struct CarouselSyncController {
    config: CarouselConfig,
    len: usize,
    active: usize,
    pending: Option<usize>,
    paused: bool,
    revealed: Option<usize>,
    running: bool,
    timer: AutoplayTimer,
}

impl CarouselSyncController {
    /// Create a controller for `len` slides, stopped, at slide 0
    #[must_use]
    pub fn new(len: usize, config: CarouselConfig) -> Self {
        let timer = AutoplayTimer::new(config.interval);
        Self {
            config,
            len,
            active: 0,
            pending: None,
            paused: false,
            revealed: None,
            running: false,
            timer,
        }
    }

    /// Number of slides
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no slides
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slide index (meaningless when empty)
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Whether pointer interaction has paused autoplay
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Card currently showing its detail overlay
    #[must_use]
    pub fn revealed_index(&self) -> Option<usize> {
        self.revealed
    }

    /// Index requested by the tab row and not yet settled
    #[must_use]
    pub fn pending_index(&self) -> Option<usize> {
        self.pending
    }

    /// Next autoplay deadline
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Start autoplay. Does nothing for an empty carousel.
    ///
    /// Pointer, reveal and pending-transition state belong to one mount and
    /// start clear. The active slide is kept.
    pub fn start(&mut self, now: Instant) {
        self.paused = false;
        self.revealed = None;
        self.pending = None;
        if self.is_empty() {
            debug!("Carousel empty, autoplay not started");
            return;
        }
        self.running = true;
        if self.config.autoplay && !self.paused {
            self.timer.arm(now);
        }
    }

    /// Stop autoplay and cancel any pending tick
    pub fn stop(&mut self) {
        self.running = false;
        self.timer.cancel();
    }

    /// Advance if the autoplay tick is due. Returns true if the index moved.
    ///
    /// The next tick is scheduled from `now`, so a late wakeup never fires a
    /// burst of catch-up ticks.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.timer.is_due(now) {
            return false;
        }
        if self.paused || !self.running || self.is_empty() {
            self.timer.cancel();
            return false;
        }

        self.active = (self.active + 1) % self.len;
        self.pending = None;
        self.timer.arm(now);
        debug!(active = self.active, "Autoplay advanced");
        true
    }

    /// Request a slide from the tab row
    ///
    /// Returns the slide now active, or `None` if the request was ignored.
    ///
    /// # Errors
    ///
    /// Fails under [`IndexPolicy::Strict`] for an out-of-range index or an
    /// empty carousel.
    pub fn select_index(&mut self, index: usize) -> Result<Option<usize>, CarouselError> {
        let Some(index) = self.config.index_policy.resolve(index, self.len)? else {
            return Ok(None);
        };
        self.active = index;
        self.pending = Some(index);
        debug!(index, "Slide requested");
        Ok(Some(index))
    }

    /// Record where a slide transition came to rest
    ///
    /// # Errors
    ///
    /// Same range rules as [`select_index`](Self::select_index).
    pub fn settle(&mut self, index: usize) -> Result<Option<usize>, CarouselError> {
        let Some(index) = self.config.index_policy.resolve(index, self.len)? else {
            return Ok(None);
        };
        if let Some(requested) = self.pending.take() {
            if requested != index {
                debug!(requested, settled = index, "Transition interrupted, settle wins");
            }
        }
        self.active = index;
        Ok(Some(index))
    }

    /// Pause or resume autoplay
    ///
    /// Pausing cancels the pending tick. Resuming schedules a fresh tick at
    /// `now + interval`.
    pub fn set_paused(&mut self, paused: bool, now: Instant) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        if paused {
            self.timer.cancel();
        } else if self.running && self.config.autoplay && !self.is_empty() {
            self.timer.arm(now);
        }
        debug!(paused, "Autoplay pause changed");
    }

    /// Tap a card: reveal it, or collapse it if it is already revealed
    ///
    /// Returns the revealed card afterwards. Taps on missing cards collapse.
    pub fn tap_card(&mut self, index: usize) -> Option<usize> {
        self.revealed = if index >= self.len || self.revealed == Some(index) {
            None
        } else {
            Some(index)
        };
        self.revealed
    }

    /// Tap anywhere else: collapse the revealed card
    pub fn tap_outside(&mut self) {
        self.revealed = None;
    }

    /// Number of slides in view at a viewport width
    #[must_use]
    pub fn slides_to_show(&self, width: u32) -> usize {
        if self.is_empty() {
            return 0;
        }
        let show = self
            .config
            .responsive
            .iter()
            .filter(|rule| width < rule.below_px)
            .min_by_key(|rule| rule.below_px)
            .map_or(self.config.slides_to_show, |rule| rule.slides_to_show);
        show.clamp(1, self.len)
    }

    /// Slide indices in view at a viewport width, starting at the active one
    pub fn visible_window(&self, width: u32) -> impl Iterator<Item = usize> + '_ {
        let show = self.slides_to_show(width);
        (0..show).map(move |offset| (self.active + offset) % self.len)
    }

    /// Current state for the view layer
    #[must_use]
    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            active_index: self.active,
            paused: self.paused,
            revealed_index: self.revealed,
            len: self.len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> CarouselConfig {
        CarouselConfig {
            index_policy: IndexPolicy::Strict,
            ..CarouselConfig::default()
        }
    }

    fn started(len: usize, config: CarouselConfig, now: Instant) -> CarouselSyncController {
        let mut c = CarouselSyncController::new(len, config);
        c.start(now);
        c
    }

    #[test]
    fn test_tick_wraps_at_end() {
        let t0 = Instant::now();
        let mut c = started(5, strict(), t0);
        c.select_index(4).unwrap();
        c.settle(4).unwrap();

        assert!(c.tick(t0 + Duration::from_millis(3000)));
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_tick_not_due_does_nothing() {
        let t0 = Instant::now();
        let mut c = started(3, strict(), t0);
        assert!(!c.tick(t0 + Duration::from_millis(2999)));
        assert_eq!(c.active_index(), 0);
        assert!(c.tick(t0 + Duration::from_millis(3000)));
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_late_tick_does_not_catch_up() {
        let t0 = Instant::now();
        let mut c = started(5, strict(), t0);
        let late = t0 + Duration::from_secs(30);
        assert!(c.tick(late));
        assert_eq!(c.active_index(), 1);
        assert_eq!(c.next_deadline(), Some(late + DEFAULT_AUTOPLAY_INTERVAL));
        assert!(!c.tick(late));
    }

    #[test]
    fn test_paused_drops_ticks_and_resume_schedules_fresh() {
        let t0 = Instant::now();
        let mut c = started(4, strict(), t0);

        c.set_paused(true, t0 + Duration::from_millis(100));
        assert_eq!(c.next_deadline(), None);
        assert!(!c.tick(t0 + Duration::from_secs(10)));
        assert_eq!(c.active_index(), 0);

        let resume = t0 + Duration::from_secs(10);
        c.set_paused(false, resume);
        assert_eq!(c.next_deadline(), Some(resume + DEFAULT_AUTOPLAY_INTERVAL));
        assert!(!c.tick(resume + Duration::from_millis(2999)));
        assert!(c.tick(resume + DEFAULT_AUTOPLAY_INTERVAL));
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_manual_selection_while_paused() {
        let t0 = Instant::now();
        let mut c = started(4, strict(), t0);
        c.set_paused(true, t0);
        assert_eq!(c.select_index(2), Ok(Some(2)));
        assert_eq!(c.active_index(), 2);
        assert!(c.is_paused());
    }

    #[test]
    fn test_settle_overrides_optimistic_request() {
        let mut c = CarouselSyncController::new(5, strict());
        c.select_index(3).unwrap();
        assert_eq!(c.pending_index(), Some(3));
        assert_eq!(c.active_index(), 3);

        // A drag interrupted the transition one slide early
        c.settle(2).unwrap();
        assert_eq!(c.active_index(), 2);
        assert_eq!(c.pending_index(), None);
    }

    #[test]
    fn test_strict_rejects_out_of_range() {
        let mut c = CarouselSyncController::new(3, strict());
        c.select_index(1).unwrap();
        assert_eq!(
            c.select_index(3),
            Err(CarouselError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(c.active_index(), 1);
        assert!(c.settle(7).is_err());
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_clamp_policy_clamps() {
        let mut c = CarouselSyncController::new(
            3,
            CarouselConfig {
                index_policy: IndexPolicy::Clamp,
                ..CarouselConfig::default()
            },
        );
        assert_eq!(c.select_index(10), Ok(Some(2)));
        assert_eq!(c.active_index(), 2);
    }

    #[test]
    fn test_empty_carousel_never_arms() {
        let t0 = Instant::now();
        let mut c = started(0, strict(), t0);
        assert!(c.is_empty());
        assert_eq!(c.next_deadline(), None);
        assert!(!c.tick(t0 + Duration::from_secs(60)));
        assert_eq!(c.select_index(0), Err(CarouselError::Empty));
        c.set_paused(true, t0);
        c.set_paused(false, t0);
        assert_eq!(c.next_deadline(), None);
        assert_eq!(c.slides_to_show(1200), 0);
        assert_eq!(c.visible_window(1200).count(), 0);
    }

    #[test]
    fn test_clamp_ignores_requests_on_empty_carousel() {
        let mut c = CarouselSyncController::new(
            0,
            CarouselConfig {
                index_policy: IndexPolicy::Clamp,
                ..CarouselConfig::default()
            },
        );
        assert_eq!(c.select_index(0), Ok(None));
        assert_eq!(c.settle(3), Ok(None));
        assert_eq!(c.active_index(), 0);
        assert_eq!(c.pending_index(), None);
    }

    #[test]
    fn test_start_clears_per_mount_state() {
        let t0 = Instant::now();
        let mut c = started(3, strict(), t0);
        c.select_index(2).unwrap();
        c.set_paused(true, t0);
        c.tap_card(1);
        c.stop();

        c.start(t0);
        assert!(!c.is_paused());
        assert_eq!(c.revealed_index(), None);
        assert_eq!(c.pending_index(), None);
        assert_eq!(c.active_index(), 2);
        assert_eq!(c.next_deadline(), Some(t0 + DEFAULT_AUTOPLAY_INTERVAL));
    }

    #[test]
    fn test_stop_cancels_timer() {
        let t0 = Instant::now();
        let mut c = started(3, strict(), t0);
        assert!(c.next_deadline().is_some());
        c.stop();
        assert_eq!(c.next_deadline(), None);
        c.set_paused(true, t0);
        c.set_paused(false, t0);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn test_autoplay_disabled() {
        let t0 = Instant::now();
        let c = started(
            3,
            CarouselConfig {
                autoplay: false,
                ..strict()
            },
            t0,
        );
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn test_tap_to_reveal_is_exclusive() {
        let mut c = CarouselSyncController::new(3, strict());
        assert_eq!(c.tap_card(0), Some(0));
        assert_eq!(c.tap_card(2), Some(2));
        assert_eq!(c.revealed_index(), Some(2));
        assert_eq!(c.tap_card(2), None);
        c.tap_card(1);
        c.tap_outside();
        assert_eq!(c.revealed_index(), None);
        assert_eq!(c.tap_card(9), None);
    }

    #[test]
    fn test_responsive_slides_to_show() {
        let c = CarouselSyncController::new(5, strict());
        assert_eq!(c.slides_to_show(1440), 3);
        assert_eq!(c.slides_to_show(1024), 3);
        assert_eq!(c.slides_to_show(1023), 2);
        assert_eq!(c.slides_to_show(639), 1);

        let small = CarouselSyncController::new(2, strict());
        assert_eq!(small.slides_to_show(1440), 2);
    }

    #[test]
    fn test_visible_window_wraps() {
        let mut c = CarouselSyncController::new(3, strict());
        c.select_index(2).unwrap();
        let window: Vec<_> = c.visible_window(1440).collect();
        assert_eq!(window, vec![2, 0, 1]);
    }
}
