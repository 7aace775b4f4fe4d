//! The egocentric view: the acting agent's local vision, always centered on
//! the agent and oriented with the agent facing up, independent of world
//! coordinates.

use egui::{Color32, TextureHandle, TextureOptions};
use egui_plot::{Line, Plot, PlotBounds, PlotImage, PlotPoint, PlotPoints};
use glam::Vec2;

use crate::config::SimulatorConfig;
use crate::render::color::field_to_image;
use crate::render::glyph;
use crate::sim::{CellField, Direction};

/// Reference-grid alpha. The window is not patch-backed, so there is no
/// fixed/mutable distinction here.
const GRID_ALPHA: u8 = 77;

pub struct AgentPanel {
    /// Last uploaded vision texture. Kept across frames so the panel content
    /// stays put when the acting agent is absent.
    vision_texture: Option<TextureHandle>,
    line_width: f32,
}

impl AgentPanel {
    pub fn new(line_width: f32) -> Self {
        Self {
            vision_texture: None,
            line_width,
        }
    }

    /// Upload a fresh vision buffer, or keep the previous one when `vision`
    /// is `None` (acting agent absent this frame).
    pub fn prepare(&mut self, ctx: &egui::Context, vision: Option<&CellField>) {
        if let Some(field) = vision {
            self.vision_texture =
                Some(ctx.load_texture("agent_vision", field_to_image(field), TextureOptions::NEAREST));
        }
    }

    /// Whether any vision buffer has been shown yet.
    pub fn has_content(&self) -> bool {
        self.vision_texture.is_some()
    }

    pub fn show(&self, ui: &mut egui::Ui, config: &SimulatorConfig) {
        let range = f64::from(config.vision_range);
        let half = range + 0.5;
        let response = Plot::new("agent_view")
            .data_aspect(1.0)
            .show_grid(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([-half, -half], [half, half]));
                if let Some(texture) = &self.vision_texture {
                    plot_ui.image(PlotImage::new(
                        "vision",
                        texture.id(),
                        PlotPoint::new(0.0, 0.0),
                        egui::vec2((2.0 * half) as f32, (2.0 * half) as f32),
                    ));
                }
                let color = Color32::from_black_alpha(GRID_ALPHA);
                for k in 0..2 * config.vision_range {
                    let offset = f64::from(k) - range + 0.5;
                    plot_ui.line(
                        Line::new("grid", PlotPoints::from(vec![[offset, -half], [offset, half]]))
                            .color(color)
                            .width(self.line_width),
                    );
                    plot_ui.line(
                        Line::new("grid", PlotPoints::from(vec![[-half, offset], [half, offset]]))
                            .color(color)
                            .width(self.line_width),
                    );
                }
            });

        // The egocentric frame always shows the agent facing up, whatever
        // its true world facing.
        let painter = ui.painter().with_clip_rect(response.response.rect);
        glyph::paint_agent(
            &painter,
            &response.transform,
            Vec2::ZERO,
            Direction::Up,
            config.agent_color,
        );
    }
}
