//! Scent-to-color mapping shared by the world and egocentric overlays.

use egui::{Color32, ColorImage};

use crate::config::Rgb;
use crate::sim::CellField;

/// Log-intensity ceiling used to normalize scent before display.
pub const MAX_SCENT: f32 = 0.9;

/// Map one raw 3-channel intensity to a display color.
///
/// Each channel is compressed with `ln(c^0.4 + 1)`, normalized by
/// [`MAX_SCENT`] and clamped to `[0, 1]`, then moved into a subtractive
/// space: an all-zero input is white, and each channel subtracts from the
/// two complementary display channels rather than its own.
///
/// Precondition: inputs are non-negative and finite. Negative or NaN input
/// is a caller contract violation and is not validated here.
///
/// This is the single color law for both panels; the world scent overlay
/// and the egocentric vision overlay must not diverge.
pub fn scent_to_rgb(raw: Rgb) -> Rgb {
    let mut c = [0.0f32; 3];
    for (channel, &value) in c.iter_mut().zip(raw.iter()) {
        *channel = ((value.max(0.0).powf(0.4) + 1.0).ln() / MAX_SCENT).clamp(0.0, 1.0);
    }
    [
        1.0 - 0.5 * (c[1] + c[2]),
        1.0 - 0.5 * (c[0] + c[2]),
        1.0 - 0.5 * (c[0] + c[1]),
    ]
}

/// Convert a display color in `[0, 1]³` to an egui color.
pub fn rgb_to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(
        (rgb[0].clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb[1].clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb[2].clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Render a whole field through [`scent_to_rgb`].
///
/// The top image row corresponds to the field's highest y: world
/// coordinates are y-up, image rows are y-down.
pub fn field_to_image(field: &CellField) -> ColorImage {
    let n = field.extent();
    let mut bytes = Vec::with_capacity(n * n * 3);
    for row in 0..n {
        let y = n - 1 - row;
        for x in 0..n {
            let rgb = scent_to_rgb(field.get(x, y));
            for channel in rgb {
                bytes.push((channel.clamp(0.0, 1.0) * 255.0).round() as u8);
            }
        }
    }
    ColorImage::from_rgb([n, n], &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_maps_to_white() {
        assert_eq!(scent_to_rgb([0.0, 0.0, 0.0]), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_output_stays_in_unit_range() {
        for &raw in &[
            [0.0, 0.0, 0.0],
            [0.1, 0.2, 0.3],
            [1.0, 1.0, 1.0],
            [5.0, 0.0, 100.0],
            [1.0e6, 1.0e6, 1.0e6],
        ] {
            let rgb = scent_to_rgb(raw);
            for channel in rgb {
                assert!((0.0..=1.0).contains(&channel), "{raw:?} -> {rgb:?}");
            }
        }
    }

    #[test]
    fn test_channel_subtracts_from_complements() {
        // A pure red intensity should leave the red display channel alone
        // and pull green and blue down by the same amount.
        let rgb = scent_to_rgb([2.0, 0.0, 0.0]);
        assert_eq!(rgb[0], 1.0);
        assert!(rgb[1] < 1.0);
        assert_eq!(rgb[1], rgb[2]);
    }

    #[test]
    fn test_intensity_saturates() {
        // Past the calibration ceiling, more intensity no longer darkens.
        let strong = scent_to_rgb([50.0, 0.0, 0.0]);
        let stronger = scent_to_rgb([5000.0, 0.0, 0.0]);
        assert_eq!(strong, stronger);
        assert_eq!(strong[1], 0.5);
    }

    #[test]
    fn test_image_orientation_is_y_up() {
        let mut field = CellField::zeroed(3);
        field.add(0, 0, [100.0, 0.0, 0.0]);
        let image = field_to_image(&field);
        assert_eq!(image.size, [3, 3]);
        // The marked cell is at the field's bottom-left, which is the image's
        // bottom row, first column.
        let bottom_left = image.pixels[2 * 3];
        let top_left = image.pixels[0];
        assert_eq!(top_left, Color32::WHITE);
        assert!(bottom_left.g() < 255);
    }

    #[test]
    fn test_rgb_to_color32_clamps() {
        assert_eq!(rgb_to_color32([1.5, -0.5, 0.5]), Color32::from_rgb(255, 0, 128));
    }
}
