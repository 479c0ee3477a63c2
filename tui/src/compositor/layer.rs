//! Compositor Layer

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::LayerId;

/// One z-ordered drawing surface
#[derive(Debug)]
pub struct Layer {
    /// Identifier assigned by the compositor
    pub id: LayerId,
    /// Position and size on screen
    pub bounds: Rect,
    /// Higher draws later
    pub z_index: i32,
    /// Hidden layers are skipped when compositing and hit testing
    pub visible: bool,
    /// Opaque layers overwrite every cell, including blanks
    pub opaque: bool,
    /// Layer content in origin coordinates
    pub buffer: Buffer,
}

impl Layer {
    /// Create a visible, transparent layer
    #[must_use]
    pub fn new(id: LayerId, bounds: Rect, z_index: i32) -> Self {
        Self {
            id,
            bounds,
            z_index,
            visible: true,
            opaque: false,
            buffer: Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height)),
        }
    }

    /// Whether a screen position falls inside this layer
    #[must_use]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.bounds.x
            && y >= self.bounds.y
            && x < self.bounds.x.saturating_add(self.bounds.width)
            && y < self.bounds.y.saturating_add(self.bounds.height)
    }
}
