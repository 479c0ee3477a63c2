//! Widgets

pub mod text_block;

pub use text_block::TextBlock;
