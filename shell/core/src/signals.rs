//! Signal Listener Registration
//!
//! A surface exposes its environment to the shell through [`SignalSource`]:
//! it reports the current viewport width and scroll offset, and accepts
//! listener registrations for each signal kind. The shell registers at mount
//! and detaches every registration at unmount, so remounting never stacks
//! listeners.
//!
//! [`HeadlessSignals`] is an in-memory source for tests and the replay tool.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of environment signal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Viewport resize
    Resize,
    /// Vertical scroll
    Scroll,
    /// Pointer and tap input
    Pointer,
    /// Repeating timer
    Timer,
}

impl SignalKind {
    /// Every kind the shell listens to, in registration order
    pub const ALL: [SignalKind; 4] = [Self::Resize, Self::Scroll, Self::Pointer, Self::Timer];

    /// Whether listeners of this kind must be passive
    ///
    /// High-frequency environment signals never block the event queue.
    #[must_use]
    pub fn requires_passive(self) -> bool {
        matches!(self, Self::Resize | Self::Scroll)
    }
}

/// Options for a listener registration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerOptions {
    /// Listener never blocks or cancels the signal
    pub passive: bool,
}

impl ListenerOptions {
    /// Options appropriate for a signal kind
    #[must_use]
    pub fn for_kind(kind: SignalKind) -> Self {
        Self {
            passive: kind.requires_passive(),
        }
    }
}

/// Handle for a registered listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// Listener registration failures
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ListenError {
    /// The runtime has no window to attach to
    #[error("no window available for {0:?} listener")]
    NoWindow(SignalKind),

    /// The environment refused the registration
    #[error("{kind:?} listener rejected: {reason}")]
    Rejected {
        /// Kind that failed
        kind: SignalKind,
        /// Environment-specific reason
        reason: String,
    },
}

/// Read-only view of the environment
pub trait EnvironmentProbe {
    /// Current viewport width in pixels, if the runtime can report it
    fn viewport_width(&self) -> Option<u32>;

    /// Current vertical scroll offset in pixels, if the runtime can report it
    fn scroll_offset(&self) -> Option<f64>;
}

/// An environment the shell can attach listeners to
pub trait SignalSource: EnvironmentProbe {
    /// Register a listener
    ///
    /// # Errors
    ///
    /// Returns [`ListenError`] when the environment cannot deliver the signal.
    fn listen(&mut self, kind: SignalKind, options: ListenerOptions)
        -> Result<ListenerId, ListenError>;

    /// Remove a listener. Unknown ids are ignored.
    fn unlisten(&mut self, id: ListenerId);
}

/// In-memory signal source
#[derive(Clone, Debug, Default)]
pub struct HeadlessSignals {
    width: Option<u32>,
    offset: Option<f64>,
    listeners: BTreeMap<ListenerId, (SignalKind, ListenerOptions)>,
    next_id: u64,
    refuse: Option<SignalKind>,
}

impl HeadlessSignals {
    /// A source reporting the given viewport at the top of the page
    #[must_use]
    pub fn new(width: u32) -> Self {
        Self {
            width: Some(width),
            offset: Some(0.0),
            ..Self::default()
        }
    }

    /// A source with no window: every probe returns `None` and every
    /// registration fails
    #[must_use]
    pub fn windowless() -> Self {
        Self::default()
    }

    /// Report a scroll offset at mount
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Refuse registrations of one kind
    #[must_use]
    pub fn refusing(mut self, kind: SignalKind) -> Self {
        self.refuse = Some(kind);
        self
    }

    /// Update the reported width
    pub fn set_width(&mut self, width: u32) {
        self.width = Some(width);
    }

    /// Number of live listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Options of the live listener for a kind, if any
    #[must_use]
    pub fn options_for(&self, kind: SignalKind) -> Option<ListenerOptions> {
        self.listeners
            .values()
            .find(|(k, _)| *k == kind)
            .map(|(_, options)| *options)
    }
}

impl EnvironmentProbe for HeadlessSignals {
    fn viewport_width(&self) -> Option<u32> {
        self.width
    }

    fn scroll_offset(&self) -> Option<f64> {
        self.offset
    }
}

impl SignalSource for HeadlessSignals {
    fn listen(
        &mut self,
        kind: SignalKind,
        options: ListenerOptions,
    ) -> Result<ListenerId, ListenError> {
        if self.width.is_none() {
            return Err(ListenError::NoWindow(kind));
        }
        if self.refuse == Some(kind) {
            return Err(ListenError::Rejected {
                kind,
                reason: "refused by headless source".to_string(),
            });
        }
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, (kind, options));
        Ok(id)
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_listeners_are_passive() {
        assert!(ListenerOptions::for_kind(SignalKind::Scroll).passive);
        assert!(ListenerOptions::for_kind(SignalKind::Resize).passive);
        assert!(!ListenerOptions::for_kind(SignalKind::Pointer).passive);
    }

    #[test]
    fn test_headless_register_and_remove() {
        let mut source = HeadlessSignals::new(1024);
        let a = source
            .listen(SignalKind::Scroll, ListenerOptions::for_kind(SignalKind::Scroll))
            .unwrap();
        let b = source
            .listen(SignalKind::Timer, ListenerOptions::default())
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(source.listener_count(), 2);
        assert_eq!(
            source.options_for(SignalKind::Scroll),
            Some(ListenerOptions { passive: true })
        );

        source.unlisten(a);
        source.unlisten(a);
        assert_eq!(source.listener_count(), 1);
    }

    #[test]
    fn test_windowless_refuses() {
        let mut source = HeadlessSignals::windowless();
        assert_eq!(source.viewport_width(), None);
        assert_eq!(
            source.listen(SignalKind::Resize, ListenerOptions::default()),
            Err(ListenError::NoWindow(SignalKind::Resize))
        );
    }
}
