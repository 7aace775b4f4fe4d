//! Viewport state and the viewport-to-patch tiling math.

use glam::{DVec2, IVec2};

/// Camera bounds over the world, in cell units.
///
/// Owned exclusively by the viewer: overwritten by `set_viewbox` and read
/// back from the display after every draw to capture interactive pan/zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub bottom_left: DVec2,
    pub top_right: DVec2,
}

impl Viewport {
    /// Caller contract: `bottom_left` must be strictly below and left of
    /// `top_right` on both axes.
    pub fn new(bottom_left: DVec2, top_right: DVec2) -> Self {
        assert!(
            bottom_left.x < top_right.x && bottom_left.y < top_right.y,
            "viewport corners must satisfy bottom_left < top_right per axis"
        );
        Self {
            bottom_left,
            top_right,
        }
    }

    pub fn width(&self) -> f64 {
        self.top_right.x - self.bottom_left.x
    }

    pub fn height(&self) -> f64 {
        self.top_right.y - self.bottom_left.y
    }
}

/// Integer patch-coordinate bounding box: `lower` inclusive, `upper`
/// exclusive, both in patch units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchBox {
    pub lower: IVec2,
    pub upper: IVec2,
}

impl PatchBox {
    /// The smallest patch box that fully encloses `view`.
    ///
    /// Never a strict subset of the visible area: anything inside the
    /// viewport lies inside `[lower * patch_size, upper * patch_size)`.
    pub fn enclosing(view: Viewport, patch_size: u32) -> Self {
        let size = f64::from(patch_size);
        let lower = IVec2::new(
            (view.bottom_left.x / size).floor() as i32,
            (view.bottom_left.y / size).floor() as i32,
        );
        let upper = IVec2::new(
            (view.top_right.x / size).ceil() as i32,
            (view.top_right.y / size).ceil() as i32,
        );
        Self { lower, upper }
    }

    pub fn contains(&self, position: IVec2) -> bool {
        position.x >= self.lower.x
            && position.x < self.upper.x
            && position.y >= self.lower.y
            && position.y < self.upper.y
    }

    pub fn patch_count(&self) -> usize {
        let extent = (self.upper - self.lower).max(IVec2::ZERO);
        extent.x as usize * extent.y as usize
    }
}
