//! Secretariat Disclosure
//!
//! The secretariat grid is hidden behind a single expand/collapse button.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which way the disclosure chevron points
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chevron {
    /// Collapsed: more below
    Down,
    /// Expanded: collapse upward
    Up,
}

/// Expand/collapse state for one section
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Disclosure {
    expanded: bool,
}

impl Disclosure {
    /// Create a collapsed disclosure
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a disclosure in a known state
    #[must_use]
    pub fn from_expanded(expanded: bool) -> Self {
        Self { expanded }
    }

    /// Flip between expanded and collapsed. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        debug!(expanded = self.expanded, "Secretariat toggled");
        self.expanded
    }

    /// Whether the section content is shown
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Button text for the current state
    #[must_use]
    pub fn button_label(&self) -> &'static str {
        if self.expanded {
            "Hide Secretariat"
        } else {
            "Meet the Secretariat"
        }
    }

    /// Chevron for the current state
    #[must_use]
    pub fn chevron(&self) -> Chevron {
        if self.expanded {
            Chevron::Up
        } else {
            Chevron::Down
        }
    }
}
