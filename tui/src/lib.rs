//! Samvaad TUI - Terminal surface for the landing page shell
//!
//! Renders the conference landing page in a terminal and feeds terminal
//! input to the headless [`shell_core::Shell`].
//!
//! # Architecture
//!
//! - **Signals**: The terminal as a pixel-based signal source
//! - **View**: Pure page, header and dropdown rendering from a snapshot
//! - **Compositor**: Layered rendering so the header floats over the page
//! - **Widgets**: Wrapped text blocks

pub mod app;
pub mod compositor;
pub mod signals;
pub mod theme;
pub mod view;
pub mod widgets;

pub use app::App;
