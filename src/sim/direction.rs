//! Agent facing directions and their glyph placement.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The four facings an agent can have on the grid.
///
/// Within the viewer this only drives how the directional glyph is drawn;
/// it carries no movement semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Positional nudge and rotation for the triangular agent glyph.
    ///
    /// The nudge pulls the triangle's circumcenter back so the glyph sits
    /// visually centered in its cell; the angle rotates the apex toward the
    /// facing (0 = up, counter-clockwise).
    pub fn glyph_placement(self) -> (Vec2, f32) {
        match self {
            Direction::Up => (Vec2::new(0.0, -0.1), 0.0),
            Direction::Down => (Vec2::new(0.0, 0.1), PI),
            Direction::Left => (Vec2::new(0.1, 0.0), PI / 2.0),
            Direction::Right => (Vec2::new(-0.1, 0.0), 3.0 * PI / 2.0),
        }
    }

    /// One cell of travel in this direction.
    pub fn step(self) -> glam::IVec2 {
        match self {
            Direction::Up => glam::IVec2::Y,
            Direction::Down => glam::IVec2::NEG_Y,
            Direction::Left => glam::IVec2::NEG_X,
            Direction::Right => glam::IVec2::X,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_placement_table() {
        let (offset, angle) = Direction::Up.glyph_placement();
        assert_eq!(offset, Vec2::new(0.0, -0.1));
        assert_eq!(angle, 0.0);

        let (offset, angle) = Direction::Down.glyph_placement();
        assert_eq!(offset, Vec2::new(0.0, 0.1));
        assert_eq!(angle, PI);

        let (offset, angle) = Direction::Left.glyph_placement();
        assert_eq!(offset, Vec2::new(0.1, 0.0));
        assert_eq!(angle, PI / 2.0);

        let (offset, angle) = Direction::Right.glyph_placement();
        assert_eq!(offset, Vec2::new(-0.1, 0.0));
        assert_eq!(angle, 3.0 * PI / 2.0);
    }

    #[test]
    fn test_step_is_unit_length() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(dir.step().abs().element_sum(), 1);
        }
    }
}
