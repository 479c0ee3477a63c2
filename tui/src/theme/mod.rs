//! Theme and Colors
//!
//! The conference palette: a blue accent on light gray sections, dark gray
//! body text, white header and cards.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Site Palette
// ============================================================================

/// Accent blue (buttons, active tab, links)
pub const ACCENT_BLUE: Color = Color::Rgb(37, 99, 235);

/// Section background - light gray
pub const SECTION_GRAY: Color = Color::Rgb(243, 244, 246);

/// Body text - dark gray
pub const BODY_TEXT: Color = Color::Rgb(55, 65, 81);

/// Secondary text (positions, descriptions)
pub const MUTED_TEXT: Color = Color::Rgb(75, 85, 99);

/// Header and card surface
pub const SURFACE_WHITE: Color = Color::Rgb(255, 255, 255);

/// Headline black
pub const HEADLINE: Color = Color::Rgb(17, 24, 39);

/// Overlay behind a revealed card description
pub const OVERLAY_DARK: Color = Color::Rgb(31, 41, 55);

// ============================================================================
// Composite Styles
// ============================================================================

/// Header bar
#[must_use]
pub fn header() -> Style {
    Style::default().fg(HEADLINE).bg(SURFACE_WHITE)
}

/// Navigation link
#[must_use]
pub fn link() -> Style {
    Style::default().fg(ACCENT_BLUE).bg(SURFACE_WHITE)
}

/// Section heading
#[must_use]
pub fn heading() -> Style {
    Style::default().fg(HEADLINE).add_modifier(Modifier::BOLD)
}

/// Body paragraph
#[must_use]
pub fn body() -> Style {
    Style::default().fg(BODY_TEXT)
}

/// Muted detail text
#[must_use]
pub fn muted() -> Style {
    Style::default().fg(MUTED_TEXT)
}

/// Carousel tab, active or not
#[must_use]
pub fn tab(active: bool) -> Style {
    if active {
        Style::default()
            .fg(SURFACE_WHITE)
            .bg(ACCENT_BLUE)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ACCENT_BLUE)
    }
}

/// Primary button
#[must_use]
pub fn button() -> Style {
    Style::default().fg(SURFACE_WHITE).bg(ACCENT_BLUE)
}

/// Revealed card overlay
#[must_use]
pub fn overlay() -> Style {
    Style::default().fg(SURFACE_WHITE).bg(OVERLAY_DARK)
}
