//! Viewport Classification
//!
//! Maps the current viewport width onto a [`LayoutMode`]. The classifier is
//! re-evaluated on every resize signal and once at mount, so the first
//! render already matches the real viewport.
//!
//! The breakpoint is configuration, not law: 768px and 1024px have both
//! shipped. Widths strictly below the breakpoint are compact.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default compact/desktop breakpoint in pixels
pub const DEFAULT_BREAKPOINT_PX: u32 = 768;

/// Which navigation surface family the page renders
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Wide viewport: inline link list
    #[default]
    Desktop,
    /// Narrow viewport: logo, profile button and hamburger drawer
    Compact,
}

impl LayoutMode {
    /// Classify a width against a breakpoint
    #[must_use]
    pub fn for_width(width: u32, breakpoint: u32) -> Self {
        if width < breakpoint {
            Self::Compact
        } else {
            Self::Desktop
        }
    }

    /// Whether this is the compact layout
    #[must_use]
    pub fn is_compact(self) -> bool {
        matches!(self, Self::Compact)
    }

    /// Human-readable name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Compact => "compact",
        }
    }
}

/// A layout change produced by a resize sample
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutTransition {
    /// Layout before the sample
    pub from: LayoutMode,
    /// Layout after the sample
    pub to: LayoutMode,
}

impl LayoutTransition {
    /// True when the page widened out of the compact layout
    #[must_use]
    pub fn leaves_compact(&self) -> bool {
        self.from == LayoutMode::Compact && self.to == LayoutMode::Desktop
    }

    /// True when the page narrowed into the compact layout
    #[must_use]
    pub fn enters_compact(&self) -> bool {
        self.from == LayoutMode::Desktop && self.to == LayoutMode::Compact
    }
}

/// Samples viewport width and tracks the resulting layout
#[derive(Clone, Debug)]
pub struct ViewportClassifier {
    breakpoint: u32,
    mode: LayoutMode,
    last_width: Option<u32>,
}

impl ViewportClassifier {
    /// Create a classifier. Until the first sample the layout is desktop.
    #[must_use]
    pub fn new(breakpoint: u32) -> Self {
        Self {
            breakpoint,
            mode: LayoutMode::Desktop,
            last_width: None,
        }
    }

    /// The configured breakpoint in pixels
    #[must_use]
    pub fn breakpoint(&self) -> u32 {
        self.breakpoint
    }

    /// Current layout
    #[must_use]
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Most recently sampled width, if any
    #[must_use]
    pub fn last_width(&self) -> Option<u32> {
        self.last_width
    }

    /// Sample a width. Returns the transition if the layout changed.
    pub fn classify(&mut self, width: u32) -> Option<LayoutTransition> {
        self.last_width = Some(width);
        let next = LayoutMode::for_width(width, self.breakpoint);
        if next == self.mode {
            return None;
        }

        let transition = LayoutTransition {
            from: self.mode,
            to: next,
        };
        self.mode = next;
        debug!(
            width,
            breakpoint = self.breakpoint,
            from = transition.from.name(),
            to = transition.to.name(),
            "Layout changed"
        );
        Some(transition)
    }

    /// Forget samples and fall back to desktop
    pub fn reset(&mut self) {
        self.mode = LayoutMode::Desktop;
        self.last_width = None;
    }
}

impl Default for ViewportClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_BREAKPOINT_PX)
    }
}
