//! Shell Core - Headless Page Chrome for the Samvaad Landing Page
//!
//! This crate holds the interactive logic of the conference landing page:
//! the auto-hiding header, the compact/desktop layout switch with its drawer
//! menu, the committees carousel with tab synchronization, and the
//! secretariat disclosure. It knows nothing about how the page is drawn.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        UI Surfaces                              │
//! │  ┌─────────────┐  ┌──────────────┐  ┌────────────────────────┐  │
//! │  │     TUI     │  │    Replay    │  │   Tests / Headless     │  │
//! │  │  (ratatui)  │  │ (JSON lines) │  │   (HeadlessSignals)    │  │
//! │  └──────┬──────┘  └──────┬───────┘  └───────────┬────────────┘  │
//! │         └────────────────┴──────────────────────┘               │
//! │                          │                                      │
//! │                   SurfaceEvent (up)                             │
//! │                   ShellSnapshot (down)                          │
//! └──────────────────────────┼──────────────────────────────────────┘
//!                            │
//! ┌──────────────────────────┼──────────────────────────────────────┐
//! │                      SHELL CORE                                 │
//! │  ┌───────────────────────┴───────────────────────────────────┐  │
//! │  │                         Shell                             │  │
//! │  │  ┌──────────────┐  ┌──────────────────┐  ┌─────────────┐  │  │
//! │  │  │  Navigation  │  │ CarouselSync     │  │ Disclosure  │  │  │
//! │  │  │  Controller  │  │ Controller       │  │ (secretary) │  │  │
//! │  │  └──────────────┘  └──────────────────┘  └─────────────┘  │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Shell`]: Owns every controller and the listener registrations
//! - [`SurfaceEvent`]: Signals sent from UI surfaces to the shell
//! - [`ShellSnapshot`]: State surfaces render from
//! - [`SignalSource`]: How a surface exposes its environment at mount
//!
//! # Quick Start
//!
//! ```
//! use std::time::Instant;
//! use shell_core::{HeadlessSignals, Shell, ShellConfig, SiteContent, SurfaceEvent};
//!
//! let mut source = HeadlessSignals::new(500);
//! let mut shell = Shell::new(ShellConfig::default(), SiteContent::default());
//! shell.mount(&mut source, Instant::now());
//!
//! shell.handle_event(&SurfaceEvent::HamburgerTapped, Instant::now()).unwrap();
//! assert!(shell.snapshot().nav.menu_open);
//!
//! shell.unmount(&mut source);
//! assert_eq!(source.listener_count(), 0);
//! ```
//!
//! # Module Overview
//!
//! - [`viewport`]: Width to layout classification
//! - [`scroll`]: Scroll direction to header visibility
//! - [`navigation`]: Header, layout and drawer state machine
//! - [`carousel`]: Autoplay, tab and settle synchronization
//! - [`disclosure`]: Expand/collapse sections
//! - [`signals`]: Listener registration against the environment
//! - [`events`]: Events from UI surfaces to the shell
//! - [`messages`]: Snapshots from the shell to UI surfaces
//! - [`content`]: Static page content
//! - [`config`]: TOML, environment and CLI configuration
//!
//! # No Terminal Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, tokio or any
//! other UI or runtime framework. Time is passed in, never read from a clock.

#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod carousel;
pub mod config;
pub mod content;
pub mod disclosure;
pub mod events;
pub mod messages;
pub mod navigation;
pub mod scroll;
pub mod shell;
pub mod signals;
pub mod viewport;

// Re-exports for convenience
pub use carousel::{
    AutoplayTimer, CarouselConfig, CarouselError, CarouselSyncController, IndexPolicy,
    ResponsiveRule,
};
pub use content::{CarouselItem, Member, NavEntry, SiteContent};
pub use disclosure::{Chevron, Disclosure};
pub use events::{PointerAction, SurfaceEvent};
pub use messages::{CarouselSnapshot, NavSnapshot, ShellSnapshot};
pub use navigation::{MountMode, NavigationConfig, NavigationController, RenderMode};
pub use scroll::{ScrollPolicy, ScrollVisibilityTracker};
pub use shell::{Shell, ShellConfig, ShellError};
pub use signals::{
    EnvironmentProbe, HeadlessSignals, ListenError, ListenerId, ListenerOptions, SignalKind,
    SignalSource,
};
pub use viewport::{LayoutMode, LayoutTransition, ViewportClassifier};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, load_config_with_env, ConfigError,
    ConfigOverrides, ConfigSource, ShellConfigFile, ShellToml,
};
