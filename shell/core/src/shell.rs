//! Shell - The Headless Page Orchestrator
//!
//! The Shell owns every controller for one page instance:
//! - Navigation (header visibility, layout, drawer)
//! - Committees carousel (autoplay, tabs, settle, reveal)
//! - Secretariat disclosure
//!
//! # Design Philosophy
//!
//! The Shell is surface-agnostic. It doesn't know whether it's driven by a
//! terminal, a browser bridge, or a replay script. It communicates through:
//! - `SurfaceEvent`: signals received FROM the surface
//! - `ShellSnapshot`: state read BY the surface after each signal
//!
//! # Lifecycle
//!
//! ```text
//! new ──→ mount(source) ──→ handle_event / poll_timers ... ──→ unmount(source)
//!            │                                                    │
//!            └── attach listeners, classify, arm autoplay         └── detach, cancel
//! ```
//!
//! Every listener attached at mount is detached at unmount, and the autoplay
//! deadline is cancelled, so nothing fires after teardown.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::carousel::{CarouselConfig, CarouselError, CarouselSyncController};
use crate::content::{NavEntry, SiteContent};
use crate::disclosure::Disclosure;
use crate::events::SurfaceEvent;
use crate::messages::ShellSnapshot;
use crate::navigation::{MountMode, NavigationConfig, NavigationController};
use crate::signals::{ListenError, ListenerId, ListenerOptions, SignalKind, SignalSource};

/// Resolved shell configuration
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShellConfig {
    /// Header and layout settings
    pub navigation: NavigationConfig,
    /// Carousel settings
    pub carousel: CarouselConfig,
}

/// Errors returned to the surface
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ShellError {
    /// A carousel index request was rejected
    #[error(transparent)]
    Carousel(#[from] CarouselError),

    /// An event arrived before mount or after unmount
    #[error("shell is not mounted")]
    NotMounted,
}

/// Lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Unmounted,
    Mounted(MountMode),
}

/// One page instance
#[derive(Debug)]
pub struct Shell {
    content: SiteContent,
    nav: NavigationController,
    carousel: CarouselSyncController,
    secretariat: Disclosure,
    listeners: Vec<ListenerId>,
    lifecycle: Lifecycle,
}

impl Shell {
    /// Create an unmounted shell over immutable content
    #[must_use]
    pub fn new(config: ShellConfig, content: SiteContent) -> Self {
        let nav = NavigationController::new(config.navigation, content.nav.clone());
        let carousel = CarouselSyncController::new(content.slide_count(), config.carousel);
        Self {
            content,
            nav,
            carousel,
            secretariat: Disclosure::new(),
            listeners: Vec::new(),
            lifecycle: Lifecycle::Unmounted,
        }
    }

    /// Attach listeners and classify the environment
    ///
    /// Never fails: if the environment refuses a listener or cannot report
    /// its state, the shell degrades to a static, non-interactive render.
    /// Mounting an already mounted shell is a no-op.
    pub fn mount<S: SignalSource>(&mut self, source: &mut S, now: Instant) -> MountMode {
        if let Lifecycle::Mounted(mode) = self.lifecycle {
            warn!("Shell already mounted");
            return mode;
        }

        let mode = match self.attach(source) {
            Ok(()) => self.nav.mount(source),
            Err(e) => {
                warn!(error = %e, "Listener registration failed, rendering static page");
                self.nav.mount_static();
                MountMode::Static
            }
        };

        match mode {
            MountMode::Interactive => self.carousel.start(now),
            MountMode::Static => self.detach(source),
        }

        self.lifecycle = Lifecycle::Mounted(mode);
        info!(
            ?mode,
            listeners = self.listeners.len(),
            slides = self.carousel.len(),
            "Shell mounted"
        );
        mode
    }

    /// Detach every listener and cancel autoplay. Safe to call twice.
    pub fn unmount<S: SignalSource>(&mut self, source: &mut S) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        self.detach(source);
        self.carousel.stop();
        self.nav.unmount();
        self.lifecycle = Lifecycle::Unmounted;
        info!("Shell unmounted");
    }

    fn attach<S: SignalSource>(&mut self, source: &mut S) -> Result<(), ListenError> {
        for kind in SignalKind::ALL {
            match source.listen(kind, ListenerOptions::for_kind(kind)) {
                Ok(id) => self.listeners.push(id),
                Err(e) => {
                    self.detach(source);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn detach<S: SignalSource>(&mut self, source: &mut S) {
        for id in self.listeners.drain(..) {
            source.unlisten(id);
        }
    }

    /// Whether the shell is mounted
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Mounted(_))
    }

    /// Mount outcome, if mounted
    #[must_use]
    pub fn mount_mode(&self) -> Option<MountMode> {
        match self.lifecycle {
            Lifecycle::Mounted(mode) => Some(mode),
            Lifecycle::Unmounted => None,
        }
    }

    /// Apply one surface event
    ///
    /// A static shell accepts and ignores every event.
    ///
    /// # Errors
    ///
    /// [`ShellError::NotMounted`] outside the mounted lifecycle, and
    /// [`ShellError::Carousel`] for rejected carousel indices.
    pub fn handle_event(&mut self, event: &SurfaceEvent, now: Instant) -> Result<(), ShellError> {
        match self.lifecycle {
            Lifecycle::Unmounted => return Err(ShellError::NotMounted),
            Lifecycle::Mounted(MountMode::Static) => {
                debug!(event = event.name(), "Static page, event ignored");
                return Ok(());
            }
            Lifecycle::Mounted(MountMode::Interactive) => {}
        }

        match *event {
            SurfaceEvent::Resized { width } => {
                self.nav.on_resize(width);
            }
            SurfaceEvent::Scrolled { offset } => {
                self.nav.on_scroll(offset);
            }
            SurfaceEvent::HamburgerTapped => {
                self.nav.toggle_menu();
            }
            SurfaceEvent::NavLinkTapped { index } => {
                self.nav.tap_link(index);
            }
            SurfaceEvent::CarouselPointer { action } => {
                self.carousel.set_paused(action.pauses(), now);
            }
            SurfaceEvent::TabSelected { index } => {
                self.carousel.select_index(index)?;
            }
            SurfaceEvent::SlideSettled { index } => {
                self.carousel.settle(index)?;
            }
            SurfaceEvent::CardTapped { index } => {
                self.carousel.tap_card(index);
            }
            SurfaceEvent::OutsideTapped => self.carousel.tap_outside(),
            SurfaceEvent::SecretariatToggled => {
                self.secretariat.toggle();
            }
        }
        Ok(())
    }

    /// Fire the autoplay tick if it is due. Returns true if the slide moved.
    pub fn poll_timers(&mut self, now: Instant) -> bool {
        self.is_mounted() && self.carousel.tick(now)
    }

    /// When the surface should next call [`poll_timers`](Self::poll_timers)
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.carousel.next_deadline()
    }

    /// Current state for rendering
    #[must_use]
    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            nav: self.nav.snapshot(),
            render_mode: self.nav.render_mode(),
            carousel: self.carousel.snapshot(),
            secretariat_expanded: self.secretariat.is_expanded(),
            interactive: self.nav.is_interactive(),
        }
    }

    /// Static page content
    #[must_use]
    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    /// Navigation entries
    #[must_use]
    pub fn nav_entries(&self) -> &[NavEntry] {
        self.nav.entries()
    }

    /// Navigation controller
    #[must_use]
    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    /// Carousel controller
    #[must_use]
    pub fn carousel(&self) -> &CarouselSyncController {
        &self.carousel
    }

    /// Secretariat disclosure
    #[must_use]
    pub fn secretariat(&self) -> &Disclosure {
        &self.secretariat
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        if !self.listeners.is_empty() {
            warn!(
                listeners = self.listeners.len(),
                "Shell dropped while mounted; call unmount to detach listeners"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::carousel::IndexPolicy;
    use crate::events::PointerAction;
    use crate::signals::HeadlessSignals;
    use crate::viewport::LayoutMode;

    fn shell() -> Shell {
        Shell::new(
            ShellConfig {
                carousel: CarouselConfig {
                    index_policy: IndexPolicy::Strict,
                    ..CarouselConfig::default()
                },
                ..ShellConfig::default()
            },
            SiteContent::default(),
        )
    }

    #[test]
    fn test_events_before_mount_are_rejected() {
        let mut shell = shell();
        assert_eq!(
            shell.handle_event(&SurfaceEvent::HamburgerTapped, Instant::now()),
            Err(ShellError::NotMounted)
        );
    }

    #[test]
    fn test_mount_attaches_passive_environment_listeners() {
        let mut source = HeadlessSignals::new(1200);
        let mut shell = shell();
        assert_eq!(shell.mount(&mut source, Instant::now()), MountMode::Interactive);
        assert_eq!(source.listener_count(), 4);
        assert!(source.options_for(SignalKind::Scroll).unwrap().passive);
        assert!(source.options_for(SignalKind::Resize).unwrap().passive);
        assert!(shell.next_deadline().is_some());

        shell.unmount(&mut source);
        assert_eq!(source.listener_count(), 0);
        assert_eq!(shell.next_deadline(), None);
    }

    #[test]
    fn test_remount_does_not_leak_listeners() {
        let mut source = HeadlessSignals::new(1200);
        let mut shell = shell();
        let now = Instant::now();
        for _ in 0..3 {
            shell.mount(&mut source, now);
            shell.mount(&mut source, now);
            assert_eq!(source.listener_count(), 4);
            shell.unmount(&mut source);
            shell.unmount(&mut source);
            assert_eq!(source.listener_count(), 0);
        }
    }

    #[test]
    fn test_remount_while_hovered_restarts_autoplay() {
        let mut source = HeadlessSignals::new(1200);
        let mut shell = shell();
        let t0 = Instant::now();
        shell.mount(&mut source, t0);
        shell
            .handle_event(
                &SurfaceEvent::CarouselPointer {
                    action: PointerAction::Enter,
                },
                t0,
            )
            .unwrap();
        shell
            .handle_event(&SurfaceEvent::CardTapped { index: 1 }, t0)
            .unwrap();
        shell.unmount(&mut source);

        let t1 = t0 + Duration::from_secs(10);
        shell.mount(&mut source, t1);
        let carousel = shell.snapshot().carousel;
        assert!(!carousel.paused);
        assert_eq!(carousel.revealed_index, None);
        assert_eq!(shell.next_deadline(), Some(t1 + Duration::from_secs(3)));
        shell.unmount(&mut source);
    }

    #[test]
    fn test_drop_leaves_listeners_to_the_source() {
        let mut source = HeadlessSignals::new(1200);
        {
            let mut shell = shell();
            shell.mount(&mut source, Instant::now());
        }
        // Drop only warns; detaching needs the source
        assert_eq!(source.listener_count(), 4);
    }

    #[test]
    fn test_refused_listener_degrades_to_static() {
        let mut source = HeadlessSignals::new(500).refusing(SignalKind::Pointer);
        let mut shell = shell();
        let now = Instant::now();
        assert_eq!(shell.mount(&mut source, now), MountMode::Static);
        assert_eq!(source.listener_count(), 0);
        assert_eq!(shell.next_deadline(), None);

        let snapshot = shell.snapshot();
        assert!(!snapshot.interactive);
        assert!(snapshot.nav.header_visible);
        assert_eq!(snapshot.nav.layout_mode, LayoutMode::Desktop);

        shell
            .handle_event(&SurfaceEvent::Scrolled { offset: 900.0 }, now)
            .unwrap();
        assert!(shell.snapshot().nav.header_visible);
    }

    #[test]
    fn test_pointer_pauses_autoplay() {
        let mut source = HeadlessSignals::new(1200);
        let mut shell = shell();
        let t0 = Instant::now();
        shell.mount(&mut source, t0);

        shell
            .handle_event(
                &SurfaceEvent::CarouselPointer {
                    action: PointerAction::Enter,
                },
                t0,
            )
            .unwrap();
        assert!(!shell.poll_timers(t0 + Duration::from_secs(10)));
        assert_eq!(shell.snapshot().carousel.active_index, 0);

        let resume = t0 + Duration::from_secs(10);
        shell
            .handle_event(
                &SurfaceEvent::CarouselPointer {
                    action: PointerAction::Leave,
                },
                resume,
            )
            .unwrap();
        assert_eq!(
            shell.next_deadline(),
            Some(resume + shell.carousel().config().interval)
        );
    }

    #[test]
    fn test_out_of_range_tab_is_reported() {
        let mut source = HeadlessSignals::new(1200);
        let mut shell = shell();
        let now = Instant::now();
        shell.mount(&mut source, now);
        assert_eq!(
            shell.handle_event(&SurfaceEvent::TabSelected { index: 3 }, now),
            Err(ShellError::Carousel(CarouselError::IndexOutOfRange {
                index: 3,
                len: 3
            }))
        );
        assert_eq!(shell.snapshot().carousel.active_index, 0);
    }

    #[test]
    fn test_secretariat_toggle() {
        let mut source = HeadlessSignals::new(1200);
        let mut shell = shell();
        let now = Instant::now();
        shell.mount(&mut source, now);
        shell
            .handle_event(&SurfaceEvent::SecretariatToggled, now)
            .unwrap();
        assert!(shell.snapshot().secretariat_expanded);
        assert_eq!(shell.secretariat().button_label(), "Hide Secretariat");
    }
}
