//! Navigation Controller
//!
//! Merges three independent inputs into the header the page renders:
//!
//! ```text
//! resize ──→ ViewportClassifier ──┐
//! scroll ──→ ScrollVisibilityTracker ──┼──→ NavSnapshot ──→ RenderMode
//! taps   ──→ menu_open ────────────┘
//! ```
//!
//! # Invariants
//!
//! - The drawer only ever opens in the compact layout.
//! - Any layout transition closes the drawer; a drawer is never left open
//!   behind a layout it does not belong to.
//! - Classification runs once at mount, before the first render.
//! - If the environment cannot report viewport or scroll state, the
//!   controller renders the static fallback (visible header, desktop layout)
//!   and ignores environment signals.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::content::NavEntry;
use crate::messages::NavSnapshot;
use crate::scroll::{ScrollPolicy, ScrollVisibilityTracker};
use crate::signals::EnvironmentProbe;
use crate::viewport::{LayoutMode, LayoutTransition, ViewportClassifier, DEFAULT_BREAKPOINT_PX};

/// Navigation configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationConfig {
    /// Compact/desktop breakpoint in pixels
    pub breakpoint_px: u32,
    /// Scroll thresholds
    pub scroll: ScrollPolicy,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            scroll: ScrollPolicy::default(),
        }
    }
}

/// The navigation surface to draw
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Inline link list
    #[default]
    Desktop,
    /// Logo, profile and hamburger bar with the drawer closed
    CompactClosed,
    /// Logo, profile and hamburger bar with the dropdown panel
    CompactOpen,
}

impl RenderMode {
    /// Combine layout and menu state
    #[must_use]
    pub fn from_parts(layout: LayoutMode, menu_open: bool) -> Self {
        match (layout, menu_open) {
            (LayoutMode::Desktop, _) => Self::Desktop,
            (LayoutMode::Compact, false) => Self::CompactClosed,
            (LayoutMode::Compact, true) => Self::CompactOpen,
        }
    }

    /// Whether the inline link list is drawn
    #[must_use]
    pub fn shows_link_list(self) -> bool {
        matches!(self, Self::Desktop)
    }

    /// Whether the logo/profile/hamburger bar is drawn
    #[must_use]
    pub fn shows_hamburger(self) -> bool {
        !self.shows_link_list()
    }

    /// Whether the dropdown panel is drawn
    #[must_use]
    pub fn shows_dropdown(self) -> bool {
        matches!(self, Self::CompactOpen)
    }
}

/// How a mount went
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountMode {
    /// Listeners attached, state follows the environment
    Interactive,
    /// Environment unavailable, static fallback render
    Static,
}

/// Header, layout and menu state machine
#[derive(Clone, Debug)]
pub struct NavigationController {
    entries: Vec<NavEntry>,
    viewport: ViewportClassifier,
    scroll: ScrollVisibilityTracker,
    menu_open: bool,
    interactive: bool,
}

impl NavigationController {
    /// Create an unmounted controller
    #[must_use]
    pub fn new(config: NavigationConfig, entries: Vec<NavEntry>) -> Self {
        Self {
            entries,
            viewport: ViewportClassifier::new(config.breakpoint_px),
            scroll: ScrollVisibilityTracker::new(config.scroll),
            menu_open: false,
            interactive: false,
        }
    }

    /// Classify the environment synchronously
    ///
    /// Falls back to the static render when the probe cannot report width
    /// or offset.
    pub fn mount(&mut self, probe: &impl EnvironmentProbe) -> MountMode {
        self.menu_open = false;
        match (probe.viewport_width(), probe.scroll_offset()) {
            (Some(width), Some(offset)) => {
                self.viewport.reset();
                self.viewport.classify(width);
                self.scroll.reset_to(offset);
                self.interactive = true;
                info!(
                    width,
                    offset,
                    layout = self.viewport.mode().name(),
                    "Navigation mounted"
                );
                MountMode::Interactive
            }
            (width, offset) => {
                warn!(?width, ?offset, "Environment unavailable, rendering static header");
                self.mount_static();
                MountMode::Static
            }
        }
    }

    /// Enter the static fallback directly
    pub fn mount_static(&mut self) {
        self.viewport.reset();
        self.scroll.reset_to(0.0);
        self.menu_open = false;
        self.interactive = false;
    }

    /// Stop reacting to signals
    pub fn unmount(&mut self) {
        self.interactive = false;
        self.menu_open = false;
    }

    /// Whether environment signals are being applied
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Apply a resize sample
    pub fn on_resize(&mut self, width: u32) -> Option<LayoutTransition> {
        if !self.interactive {
            return None;
        }
        let transition = self.viewport.classify(width)?;
        if self.menu_open {
            debug!(
                from = transition.from.name(),
                to = transition.to.name(),
                "Layout changed, closing menu"
            );
            self.menu_open = false;
        }
        Some(transition)
    }

    /// Apply a scroll sample. Returns true if header visibility changed.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        if !self.interactive {
            return false;
        }
        self.scroll.sample(offset)
    }

    /// Hamburger tap. Ignored outside the compact layout.
    pub fn toggle_menu(&mut self) -> bool {
        if !self.interactive || !self.viewport.mode().is_compact() {
            debug!("Hamburger tap ignored outside compact layout");
            return self.menu_open;
        }
        self.menu_open = !self.menu_open;
        debug!(menu_open = self.menu_open, "Menu toggled");
        self.menu_open
    }

    /// Navigation link tap. Closes the menu and returns the tapped entry.
    pub fn tap_link(&mut self, index: usize) -> Option<&NavEntry> {
        self.menu_open = false;
        let entry = self.entries.get(index);
        match entry {
            Some(entry) => debug!(label = %entry.label, path = %entry.path, "Link tapped"),
            None => debug!(index, "Tap on missing link ignored"),
        }
        entry
    }

    /// Navigation entries
    #[must_use]
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Current layout
    #[must_use]
    pub fn layout_mode(&self) -> LayoutMode {
        self.viewport.mode()
    }

    /// Whether the drawer is open
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Whether the header is visible
    #[must_use]
    pub fn is_header_visible(&self) -> bool {
        self.scroll.is_visible()
    }

    /// The state triple for the view layer
    #[must_use]
    pub fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            header_visible: self.scroll.is_visible(),
            layout_mode: self.viewport.mode(),
            menu_open: self.menu_open,
        }
    }

    /// Enumerated render mode
    #[must_use]
    pub fn render_mode(&self) -> RenderMode {
        RenderMode::from_parts(self.viewport.mode(), self.menu_open)
    }

    /// Accessible label for the hamburger button
    #[must_use]
    pub fn hamburger_label(&self) -> &'static str {
        if self.menu_open {
            "Close menu"
        } else {
            "Open menu"
        }
    }

    /// `aria-expanded` value for the hamburger button
    #[must_use]
    pub fn aria_expanded(&self) -> bool {
        self.menu_open
    }
}
