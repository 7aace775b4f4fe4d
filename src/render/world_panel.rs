//! The primary world view: scent overlay, patch grid lines, and item/agent
//! glyphs, drawn into one interactive, pannable plot.

use egui::{Color32, TextureHandle, TextureOptions};
use egui_plot::{Line, Plot, PlotBounds, PlotImage, PlotPoint, PlotPoints};
use glam::{DVec2, IVec2};

use crate::config::SimulatorConfig;
use crate::render::color::field_to_image;
use crate::render::glyph;
use crate::render::tiler::Viewport;
use crate::sim::Patch;

/// Grid-line alpha over patches that can still change.
const GRID_ALPHA_ACTIVE: u8 = 77;
/// Grid-line alpha over fixed (settled) patches: reduced emphasis.
const GRID_ALPHA_FIXED: u8 = 26;

/// Center of a patch's cell-aligned bounding rectangle, in world units.
/// Cells sit centered on integer coordinates, so the rectangle spans
/// `[origin - 0.5, origin + size - 0.5]` per axis.
fn patch_image_center(position: IVec2, patch_size: u32) -> PlotPoint {
    let size = f64::from(patch_size);
    let origin = position.as_dvec2() * size;
    PlotPoint::new(origin.x + size / 2.0 - 0.5, origin.y + size / 2.0 - 0.5)
}

pub struct WorldPanel {
    /// Scent textures for the frame being built; replaced wholesale every
    /// draw, since patches are ephemeral.
    textures: Vec<TextureHandle>,
    line_width: f32,
}

impl WorldPanel {
    pub fn new(line_width: f32) -> Self {
        Self {
            textures: Vec::new(),
            line_width,
        }
    }

    /// Upload this frame's scent textures, one per patch. Must run before
    /// the egui pass so the texture deltas land in the same frame.
    pub fn prepare(&mut self, ctx: &egui::Context, patches: &[Patch]) {
        self.textures.clear();
        for patch in patches {
            let name = format!("scent_{}_{}", patch.position.x, patch.position.y);
            self.textures
                .push(ctx.load_texture(name, field_to_image(&patch.scent), TextureOptions::NEAREST));
        }
    }

    /// Draw every patch and return the bounds the user is now looking at.
    ///
    /// `pin` forces the camera for this frame (an explicit viewbox); without
    /// it the plot keeps its own interactive pan/zoom state.
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        config: &SimulatorConfig,
        patches: &[Patch],
        pin: Option<Viewport>,
    ) -> Viewport {
        let size = f64::from(config.patch_size);
        let response = Plot::new("world_map")
            .data_aspect(1.0)
            .show_grid(false)
            .allow_drag(true)
            .allow_zoom(true)
            .allow_scroll(true)
            .show(ui, |plot_ui| {
                if let Some(view) = pin {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                        view.bottom_left.to_array(),
                        view.top_right.to_array(),
                    ));
                }
                // Scent first so the grid draws over it.
                for (patch, texture) in patches.iter().zip(&self.textures) {
                    plot_ui.image(PlotImage::new(
                        "scent",
                        texture.id(),
                        patch_image_center(patch.position, config.patch_size),
                        egui::vec2(size as f32, size as f32),
                    ));
                }
                for patch in patches {
                    self.grid_lines(plot_ui, config.patch_size, patch);
                }
            });

        // Glyphs last, over the plot, so they are never obscured.
        let painter = ui.painter().with_clip_rect(response.response.rect);
        for patch in patches {
            for item in &patch.items {
                match config.item(item.item_type) {
                    Some(item_type) => {
                        glyph::paint_item(&painter, &response.transform, item_type, item.position);
                    }
                    None => log::warn!(
                        "patch {:?} references unknown item type {}",
                        patch.position,
                        item.item_type
                    ),
                }
            }
            for agent in &patch.agents {
                glyph::paint_agent(
                    &painter,
                    &response.transform,
                    agent.position.as_vec2(),
                    agent.facing,
                    config.agent_color,
                );
            }
        }

        let bounds = response.transform.bounds();
        Viewport::new(DVec2::from(bounds.min()), DVec2::from(bounds.max()))
    }

    /// Cell-boundary segments covering one patch, stronger over mutable
    /// patches than settled ones.
    fn grid_lines(&self, plot_ui: &mut egui_plot::PlotUi, patch_size: u32, patch: &Patch) {
        let size = f64::from(patch_size);
        let alpha = if patch.fixed {
            GRID_ALPHA_FIXED
        } else {
            GRID_ALPHA_ACTIVE
        };
        let color = Color32::from_black_alpha(alpha);
        let origin = patch.position.as_dvec2() * size;
        for k in 0..=patch_size {
            let x = origin.x + f64::from(k) - 0.5;
            plot_ui.line(
                Line::new(
                    "grid",
                    PlotPoints::from(vec![[x, origin.y - 0.5], [x, origin.y + size - 0.5]]),
                )
                .color(color)
                .width(self.line_width),
            );
            let y = origin.y + f64::from(k) - 0.5;
            plot_ui.line(
                Line::new(
                    "grid",
                    PlotPoints::from(vec![[origin.x - 0.5, y], [origin.x + size - 0.5, y]]),
                )
                .color(color)
                .width(self.line_width),
            );
        }
    }
}
