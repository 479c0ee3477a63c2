//! Layered Compositor
//!
//! Page chrome is drawn as z-ordered layers: the scrolling page at the back,
//! the fixed header over it, and the compact dropdown on top. Each layer has
//! its own buffer and can be moved, resized, hidden and hit-tested.
//!
//! Transparent layers only overwrite non-blank cells; opaque layers
//! overwrite everything inside their bounds.

mod layer;

use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

pub use layer::Layer;

/// Unique identifier for a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

/// The compositor manages all layers and composites them together
#[derive(Debug)]
pub struct Compositor {
    /// All layers by ID
    layers: HashMap<LayerId, Layer>,
    /// Layers sorted by z-index for rendering
    render_order: Vec<LayerId>,
    /// Next layer ID to assign
    next_id: u32,
    /// Output buffer (composited result)
    output: Buffer,
    /// Total area
    area: Rect,
}

impl Compositor {
    /// Create a new compositor for the given area
    #[must_use]
    pub fn new(area: Rect) -> Self {
        Self {
            layers: HashMap::new(),
            render_order: Vec::new(),
            next_id: 0,
            output: Buffer::empty(area),
            area,
        }
    }

    /// Create a new layer and return its ID
    pub fn create_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        let layer = Layer::new(id, bounds, z_index);
        self.layers.insert(id, layer);
        self.update_render_order();

        id
    }

    /// Create an opaque layer and return its ID
    pub fn create_opaque_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        let id = self.create_layer(bounds, z_index);
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.opaque = true;
        }
        id
    }

    /// Get mutable access to a layer's buffer for rendering
    pub fn layer_buffer_mut(&mut self, id: LayerId) -> Option<&mut Buffer> {
        self.layers.get_mut(&id).map(|l| &mut l.buffer)
    }

    /// Current bounds of a layer
    #[must_use]
    pub fn bounds(&self, id: LayerId) -> Option<Rect> {
        self.layers.get(&id).map(|l| l.bounds)
    }

    /// Move and resize a layer in one step. The buffer is cleared when the
    /// size changes.
    pub fn place_layer(&mut self, id: LayerId, bounds: Rect) {
        if let Some(layer) = self.layers.get_mut(&id) {
            let resized =
                layer.bounds.width != bounds.width || layer.bounds.height != bounds.height;
            layer.bounds = bounds;
            if resized {
                // Buffer uses origin coordinates
                layer.buffer = Buffer::empty(Rect::new(0, 0, bounds.width, bounds.height));
            }
        }
    }

    /// Set layer visibility
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.visible = visible;
        }
    }

    /// Whether a layer is visible
    #[must_use]
    pub fn is_visible(&self, id: LayerId) -> bool {
        self.layers.get(&id).is_some_and(|l| l.visible)
    }

    /// Resize the entire compositor
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.output = Buffer::empty(area);
    }

    /// Total area
    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Composite all visible layers into the output buffer
    pub fn composite(&mut self) -> &Buffer {
        self.output.reset();

        // Back to front
        for id in &self.render_order {
            if let Some(layer) = self.layers.get(id) {
                if layer.visible {
                    Self::blit_layer(&mut self.output, self.area, layer);
                }
            }
        }

        &self.output
    }

    /// Blit a layer onto the output buffer
    fn blit_layer(output: &mut Buffer, area: Rect, layer: &Layer) {
        let lb = layer.bounds;

        for ly in 0..lb.height {
            for lx in 0..lb.width {
                let dst_x = lb.x + lx;
                let dst_y = lb.y + ly;
                if dst_x >= area.width || dst_y >= area.height {
                    continue;
                }

                let Some(src_cell) = layer.buffer.cell((lx, ly)) else {
                    continue;
                };

                // Blank cells are holes in transparent layers
                if layer.opaque || src_cell.symbol() != " " {
                    if let Some(dst) = output.cell_mut((dst_x, dst_y)) {
                        *dst = src_cell.clone();
                    }
                }
            }
        }
    }

    /// Find the topmost layer at a given position (for mouse events)
    #[must_use]
    pub fn layer_at(&self, x: u16, y: u16) -> Option<LayerId> {
        // Front to back
        self.render_order.iter().rev().copied().find(|id| {
            self.layers
                .get(id)
                .is_some_and(|layer| layer.visible && layer.contains(x, y))
        })
    }

    /// Update render order based on z-indices
    fn update_render_order(&mut self) {
        self.render_order = self.layers.keys().copied().collect();
        self.render_order
            .sort_by_key(|id| (self.layers.get(id).map_or(0, |l| l.z_index), id.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    #[test]
    fn test_higher_layer_wins_and_blanks_are_holes() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 4, 1));
        let back = compositor.create_layer(Rect::new(0, 0, 4, 1), 0);
        let front = compositor.create_layer(Rect::new(0, 0, 4, 1), 10);

        compositor
            .layer_buffer_mut(back)
            .unwrap()
            .set_string(0, 0, "abcd", Style::default());
        compositor
            .layer_buffer_mut(front)
            .unwrap()
            .set_string(1, 0, "X", Style::default());

        let out = compositor.composite();
        assert_eq!(out.cell((0, 0)).unwrap().symbol(), "a");
        assert_eq!(out.cell((1, 0)).unwrap().symbol(), "X");
        assert_eq!(out.cell((2, 0)).unwrap().symbol(), "c");
    }

    #[test]
    fn test_opaque_layer_covers_blanks() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 4, 1));
        let back = compositor.create_layer(Rect::new(0, 0, 4, 1), 0);
        let cover = compositor.create_opaque_layer(Rect::new(0, 0, 2, 1), 10);
        compositor
            .layer_buffer_mut(back)
            .unwrap()
            .set_string(0, 0, "abcd", Style::default());

        let out = compositor.composite();
        assert_eq!(out.cell((0, 0)).unwrap().symbol(), " ");
        assert_eq!(out.cell((2, 0)).unwrap().symbol(), "c");

        compositor.set_visible(cover, false);
        let out = compositor.composite();
        assert_eq!(out.cell((0, 0)).unwrap().symbol(), "a");
    }

    #[test]
    fn test_layer_at_skips_hidden() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 10, 10));
        let page = compositor.create_layer(Rect::new(0, 0, 10, 10), 0);
        let header = compositor.create_layer(Rect::new(0, 0, 10, 2), 10);

        assert_eq!(compositor.layer_at(3, 1), Some(header));
        compositor.set_visible(header, false);
        assert_eq!(compositor.layer_at(3, 1), Some(page));
        assert_eq!(compositor.layer_at(30, 1), None);
    }

    #[test]
    fn test_place_layer_moves_and_resizes() {
        let mut compositor = Compositor::new(Rect::new(0, 0, 10, 10));
        let id = compositor.create_layer(Rect::new(0, 0, 4, 1), 0);
        compositor.place_layer(id, Rect::new(2, 3, 6, 2));
        assert_eq!(compositor.bounds(id), Some(Rect::new(2, 3, 6, 2)));
        assert_eq!(
            compositor.layer_buffer_mut(id).unwrap().area,
            Rect::new(0, 0, 6, 2)
        );
    }
}
