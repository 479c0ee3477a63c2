//! Static Site Content
//!
//! The controllers are parametric over how many entries and slides exist;
//! this module holds the actual lists. Content is an immutable value handed
//! to the [`Shell`](crate::Shell) at construction.

use serde::{Deserialize, Serialize};

/// One navigation link
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    /// Visible label
    pub label: String,
    /// Route the link points at
    pub path: String,
}

impl NavEntry {
    /// Create an entry with an explicit path
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }

    /// Create an entry whose path is derived from the label
    ///
    /// `Home` maps to `/`; anything else maps to `/` plus the lowercased
    /// label with spaces replaced by dashes.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let path = derive_path(&label);
        Self { label, path }
    }
}

fn derive_path(label: &str) -> String {
    if label.eq_ignore_ascii_case("home") {
        return "/".to_string();
    }
    let slug: String = label
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("/{slug}")
}

/// One carousel card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselItem {
    /// Short name shown on the tab and card
    pub label: String,
    /// Detail text shown when the card is revealed
    pub description: String,
    /// Image reference (rendering is up to the surface)
    pub image_ref: String,
}

impl CarouselItem {
    /// Create a carousel item
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            image_ref: image_ref.into(),
        }
    }
}

/// A secretariat member card
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member name
    pub name: String,
    /// Role title
    pub position: String,
    /// Portrait reference
    pub image_ref: String,
}

impl Member {
    /// Create a member card
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            image_ref: image_ref.into(),
        }
    }
}

/// Everything the page displays that is not controller state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    /// Hero headline
    pub title: String,
    /// About section heading
    pub about_heading: String,
    /// About section body
    pub about: String,
    /// Header navigation entries, in display order
    pub nav: Vec<NavEntry>,
    /// Committee carousel items, in display order
    pub committees: Vec<CarouselItem>,
    /// Secretariat members, in display order
    pub secretariat: Vec<Member>,
    /// Footer line
    pub footer: String,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            title: "MUN Conference 2025".to_string(),
            about_heading: "About Us".to_string(),
            about: "Welcome to the MUN Conference 2025. Delegates from across the world \
                    come together to discuss pressing global issues and develop innovative \
                    solutions through diplomacy."
                .to_string(),
            nav: ["Home", "About", "Committees", "Secretariat", "Contact"]
                .into_iter()
                .map(NavEntry::from_label)
                .collect(),
            committees: vec![
                CarouselItem::new("UNSC", "Security Council discussions", "/committee1.jpg"),
                CarouselItem::new("UNHRC", "Human Rights Council", "/committee2.jpg"),
                CarouselItem::new("WHO", "World Health Organization", "/committee3.jpg"),
            ],
            secretariat: vec![
                Member::new("Alice", "Secretary-General", "/alice.jpg"),
                Member::new("Bob", "Deputy SG", "/bob.jpg"),
                Member::new("Clara", "USG PR", "/clara.jpg"),
                Member::new("David", "USG Media", "/david.jpg"),
            ],
            footer: "\u{a9} 2025 MUN Conference".to_string(),
        }
    }
}

impl SiteContent {
    /// Number of carousel slides
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.committees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_derivation() {
        assert_eq!(NavEntry::from_label("Home").path, "/");
        assert_eq!(NavEntry::from_label("Committees").path, "/committees");
        assert_eq!(NavEntry::from_label("Press Kit").path, "/press-kit");
    }

    #[test]
    fn test_default_content_matches_landing_page() {
        let content = SiteContent::default();
        let labels: Vec<_> = content.nav.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Home", "About", "Committees", "Secretariat", "Contact"]
        );
        assert_eq!(content.slide_count(), 3);
        assert_eq!(content.secretariat.len(), 4);
        assert_eq!(content.nav[4].path, "/contact");
    }
}
