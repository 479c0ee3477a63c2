//! Surface Events
//!
//! Signals forwarded from a UI surface to the [`Shell`](crate::Shell).
//!
//! # Design Philosophy
//!
//! Surfaces report what happened, in their environment's terms mapped to
//! pixels and indices. They never decide what it means for the header or the
//! carousel; the shell does.

use serde::{Deserialize, Serialize};

/// Events from a UI surface to the shell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceEvent {
    // ============================================
    // Environment Signals (high frequency, passive)
    // ============================================
    /// Viewport width changed
    Resized {
        /// New width in pixels
        width: u32,
    },

    /// Vertical scroll offset changed
    Scrolled {
        /// New offset from the top of the page in pixels
        offset: f64,
    },

    // ============================================
    // Navigation Input
    // ============================================
    /// Hamburger button tapped
    HamburgerTapped,

    /// A navigation link was tapped
    NavLinkTapped {
        /// Position in the navigation entry list
        index: usize,
    },

    // ============================================
    // Carousel Input
    // ============================================
    /// Pointer activity over the carousel surface
    CarouselPointer {
        /// What the pointer did
        action: PointerAction,
    },

    /// A tab button above the carousel was selected
    TabSelected {
        /// Requested slide
        index: usize,
    },

    /// A slide transition finished
    SlideSettled {
        /// Slide the carousel actually rests on
        index: usize,
    },

    /// A committee card was tapped
    CardTapped {
        /// Card index
        index: usize,
    },

    /// A tap landed outside every card
    OutsideTapped,

    // ============================================
    // Section Input
    // ============================================
    /// The secretariat expand/collapse button was tapped
    SecretariatToggled,
}

impl SurfaceEvent {
    /// Short name for logging
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resized { .. } => "resized",
            Self::Scrolled { .. } => "scrolled",
            Self::HamburgerTapped => "hamburger_tapped",
            Self::NavLinkTapped { .. } => "nav_link_tapped",
            Self::CarouselPointer { .. } => "carousel_pointer",
            Self::TabSelected { .. } => "tab_selected",
            Self::SlideSettled { .. } => "slide_settled",
            Self::CardTapped { .. } => "card_tapped",
            Self::OutsideTapped => "outside_tapped",
            Self::SecretariatToggled => "secretariat_toggled",
        }
    }

    /// Whether this event comes from a passive environment observer
    #[must_use]
    pub fn is_environment_signal(&self) -> bool {
        matches!(self, Self::Resized { .. } | Self::Scrolled { .. })
    }
}

/// Pointer activity over the carousel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerAction {
    /// Pointer moved onto the carousel
    Enter,
    /// Pointer moved off the carousel
    Leave,
    /// Press started on the carousel
    Down,
    /// Press released
    Up,
}

impl PointerAction {
    /// Whether this action pauses autoplay (as opposed to resuming it)
    #[must_use]
    pub fn pauses(self) -> bool {
        matches!(self, Self::Enter | Self::Down)
    }
}
