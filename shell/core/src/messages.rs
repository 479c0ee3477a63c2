//! Shell Snapshots
//!
//! State handed from the shell to UI surfaces. Surfaces render these and
//! nothing else: no surface keeps its own copy of header, menu or carousel
//! state.
//!
//! Snapshots are plain values. A surface always renders the latest one, so
//! conflicting requests resolve as last-writer-wins.

use serde::{Deserialize, Serialize};

use crate::navigation::RenderMode;
use crate::viewport::LayoutMode;

/// Navigation state triple
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSnapshot {
    /// Whether the fixed header is shown
    pub header_visible: bool,
    /// Current layout family
    pub layout_mode: LayoutMode,
    /// Whether the compact drawer is open
    pub menu_open: bool,
}

impl NavSnapshot {
    /// The header a page shows before any signal arrives, and when the
    /// environment cannot report viewport or scroll state
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            header_visible: true,
            layout_mode: LayoutMode::Desktop,
            menu_open: false,
        }
    }

    /// Enumerated render mode for this triple
    #[must_use]
    pub fn render_mode(&self) -> RenderMode {
        RenderMode::from_parts(self.layout_mode, self.menu_open)
    }
}

impl Default for NavSnapshot {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Carousel state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselSnapshot {
    /// Slide at the start of the visible window
    pub active_index: usize,
    /// Whether pointer interaction paused autoplay
    pub paused: bool,
    /// Card showing its detail overlay
    pub revealed_index: Option<usize>,
    /// Number of slides
    pub len: usize,
}

impl CarouselSnapshot {
    /// Whether the carousel should render at all
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        self.len > 0
    }
}

/// Everything a surface needs to draw the page
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellSnapshot {
    /// Header and menu
    pub nav: NavSnapshot,
    /// Enumerated render mode derived from `nav`
    pub render_mode: RenderMode,
    /// Committees carousel
    pub carousel: CarouselSnapshot,
    /// Whether the secretariat grid is expanded
    pub secretariat_expanded: bool,
    /// False when the shell degraded to a static render
    pub interactive: bool,
}
