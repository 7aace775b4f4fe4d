//! Item and agent glyph geometry and painting.

use std::f32::consts::{FRAC_PI_2, PI};

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Shape, Stroke, StrokeKind};
use egui_plot::{PlotPoint, PlotTransform};
use glam::Vec2;

use crate::config::{ItemType, Rgb};
use crate::render::color::rgb_to_color32;
use crate::sim::Direction;

/// Circumradius of the triangular agent glyph, in cells.
pub const AGENT_RADIUS: f32 = 0.5;
/// Radius of non-blocking item discs, in cells.
pub const ITEM_RADIUS: f32 = 0.4;
/// Glyph outline width, in UI points.
const OUTLINE_WIDTH: f32 = 0.4;

fn outline() -> Stroke {
    Stroke::new(OUTLINE_WIDTH, Color32::BLACK)
}

/// Screen position of a world point.
fn to_screen(transform: &PlotTransform, point: Vec2) -> Pos2 {
    transform.position_from_point(&PlotPoint::new(f64::from(point.x), f64::from(point.y)))
}

/// Pixels per world cell. Assumes the plot keeps a unit data aspect.
fn cell_scale(transform: &PlotTransform) -> f32 {
    let origin = transform.position_from_point(&PlotPoint::new(0.0, 0.0));
    let unit = transform.position_from_point(&PlotPoint::new(1.0, 0.0));
    unit.x - origin.x
}

/// The three vertices of an agent glyph centered at `center`, apex rotated
/// by `angle` (0 = up, counter-clockwise), circumradius [`AGENT_RADIUS`].
pub fn agent_triangle(center: Vec2, angle: f32) -> [Vec2; 3] {
    let mut points = [Vec2::ZERO; 3];
    for (k, point) in points.iter_mut().enumerate() {
        let vertex_angle = angle + FRAC_PI_2 + k as f32 * 2.0 * PI / 3.0;
        *point = center + AGENT_RADIUS * Vec2::new(vertex_angle.cos(), vertex_angle.sin());
    }
    points
}

/// Draw one item glyph: a unit square for blocking items, a disc otherwise.
pub(crate) fn paint_item(
    painter: &Painter,
    transform: &PlotTransform,
    item_type: &ItemType,
    position: glam::IVec2,
) {
    let scale = cell_scale(transform);
    let fill = rgb_to_color32(item_type.color);
    let center = to_screen(transform, position.as_vec2());
    if item_type.blocks_movement {
        let rect = Rect::from_center_size(center, egui::vec2(scale, scale));
        painter.rect(rect, CornerRadius::ZERO, fill, outline(), StrokeKind::Middle);
    } else {
        painter.circle(center, ITEM_RADIUS * scale, fill, outline());
    }
}

/// Draw one agent glyph at `position` (cells), nudged and rotated per its
/// facing.
pub(crate) fn paint_agent(
    painter: &Painter,
    transform: &PlotTransform,
    position: Vec2,
    facing: Direction,
    color: Rgb,
) {
    let (offset, angle) = facing.glyph_placement();
    let points: Vec<Pos2> = agent_triangle(position + offset, angle)
        .iter()
        .map(|&p| to_screen(transform, p))
        .collect();
    painter.add(Shape::convex_polygon(
        points,
        rgb_to_color32(color),
        outline(),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1.0e-6, "{a:?} != {b:?}");
    }

    #[test]
    fn test_triangle_apex_points_up_at_zero_angle() {
        let [apex, left, right] = agent_triangle(Vec2::ZERO, 0.0);
        assert_close(apex, Vec2::new(0.0, AGENT_RADIUS));
        // The remaining vertices sit symmetrically below.
        assert!((left.x + right.x).abs() < 1.0e-6);
        assert!((left.y - right.y).abs() < 1.0e-6);
        assert!(left.y < 0.0);
    }

    #[test]
    fn test_triangle_apex_follows_facing() {
        for (facing, expected_apex) in [
            (Direction::Up, Vec2::new(0.0, AGENT_RADIUS)),
            (Direction::Down, Vec2::new(0.0, -AGENT_RADIUS)),
            (Direction::Left, Vec2::new(-AGENT_RADIUS, 0.0)),
            (Direction::Right, Vec2::new(AGENT_RADIUS, 0.0)),
        ] {
            let (_, angle) = facing.glyph_placement();
            let [apex, _, _] = agent_triangle(Vec2::ZERO, angle);
            assert_close(apex, expected_apex);
        }
    }

    #[test]
    fn test_triangle_is_centered() {
        let center = Vec2::new(3.0, -2.0);
        let points = agent_triangle(center, 1.3);
        let centroid = points.iter().copied().sum::<Vec2>() / 3.0;
        assert_close(centroid, center);
    }
}
