#![forbid(unsafe_code)]

//! Frame = Buffer + metadata for a render pass.
//!
//! The `Frame` is the render target that `Model::view()` methods write to.
//! It bundles the cell grid ([`Buffer`]) with a hit grid so widgets can
//! register clickable regions for mouse routing.

use crate::buffer::Buffer;
use vgrid_core::geometry::Rect;

/// Identifier for a clickable region in the hit grid.
///
/// Widgets register hit regions with unique IDs to enable mouse interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a new hit ID from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Opaque user data for hit callbacks.
pub type HitData = u64;

/// Regions within a widget for mouse interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    /// No interactive region.
    #[default]
    None,
    /// Main content area.
    Content,
    /// Scrollbar track, thumb, or arrows.
    Scrollbar,
    /// Clickable button.
    Button,
}

/// A single hit cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct HitCell {
    widget_id: Option<HitId>,
    region: HitRegion,
    data: HitData,
}

/// Hit testing grid for mouse interaction.
///
/// Maps screen positions to widget IDs, enabling widgets to receive
/// mouse events for their regions. Later registrations win.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    /// Create a new hit grid with the given dimensions.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![HitCell::default(); size],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Register a clickable region with the given hit metadata.
    ///
    /// All cells within the rectangle will map to this hit cell.
    pub fn register(&mut self, rect: Rect, widget_id: HitId, region: HitRegion, data: HitData) {
        let x_end = (rect.x as usize + rect.width as usize).min(self.width as usize) as u16;
        let y_end = (rect.y as usize + rect.height as usize).min(self.height as usize) as u16;

        let hit_cell = HitCell {
            widget_id: Some(widget_id),
            region,
            data,
        };
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = hit_cell;
                }
            }
        }
    }

    /// Hit test at the given position.
    ///
    /// Returns the hit tuple if a region is registered at (x, y).
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.index(x, y).and_then(|i| {
            let cell = &self.cells[i];
            cell.widget_id.map(|id| (id, cell.region, cell.data))
        })
    }

    /// Clear all hit regions.
    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }
}

/// Frame for one render pass.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid for this render pass.
    pub buffer: Buffer,

    /// Hit grid for mouse hit testing.
    hit_grid: HitGrid,
}

impl Frame {
    /// Create a new frame with given dimensions.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: HitGrid::new(width, height),
        }
    }

    /// Frame width in cells.
    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height in cells.
    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// Clear frame for the next render pass (buffer and hit grid).
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.hit_grid.clear();
    }

    /// Resize the frame, clearing its contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.buffer.resize(width, height);
        self.hit_grid = HitGrid::new(width, height);
    }

    /// Register a clickable region.
    pub fn register_hit(&mut self, rect: Rect, id: HitId, region: HitRegion, data: HitData) {
        self.hit_grid.register(rect, id, region, data);
    }

    /// Hit test at the given position.
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.hit_grid.hit_test(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_hit_test() {
        let mut frame = Frame::new(10, 10);
        frame.register_hit(Rect::new(2, 2, 3, 1), HitId::new(7), HitRegion::Button, 42);

        assert_eq!(
            frame.hit_test(3, 2),
            Some((HitId::new(7), HitRegion::Button, 42))
        );
        assert_eq!(frame.hit_test(1, 2), None);
        assert_eq!(frame.hit_test(5, 2), None);
    }

    #[test]
    fn later_registration_wins() {
        let mut frame = Frame::new(4, 4);
        frame.register_hit(Rect::new(0, 0, 4, 4), HitId::new(1), HitRegion::Content, 0);
        frame.register_hit(Rect::new(1, 1, 1, 1), HitId::new(2), HitRegion::Button, 9);

        assert_eq!(
            frame.hit_test(1, 1),
            Some((HitId::new(2), HitRegion::Button, 9))
        );
        assert_eq!(
            frame.hit_test(0, 0),
            Some((HitId::new(1), HitRegion::Content, 0))
        );
    }

    #[test]
    fn clear_resets_hits() {
        let mut frame = Frame::new(4, 4);
        frame.register_hit(Rect::new(0, 0, 4, 4), HitId::new(1), HitRegion::Content, 0);
        frame.clear();
        assert_eq!(frame.hit_test(0, 0), None);
    }

    #[test]
    fn registration_clips_to_grid() {
        let mut frame = Frame::new(4, 4);
        frame.register_hit(Rect::new(3, 3, 10, 10), HitId::new(1), HitRegion::Content, 0);
        assert!(frame.hit_test(3, 3).is_some());
        assert_eq!(frame.hit_test(0, 0), None);
    }
}
