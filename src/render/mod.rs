//! Rendering pipeline: color mapping, viewport tiling, glyph geometry, and
//! the two display panels.

mod agent_panel;
mod color;
mod glyph;
mod tiler;
mod world_panel;

pub use agent_panel::AgentPanel;
pub use color::{field_to_image, rgb_to_color32, scent_to_rgb, MAX_SCENT};
pub use glyph::{agent_triangle, AGENT_RADIUS, ITEM_RADIUS};
pub use tiler::{PatchBox, Viewport};
pub use world_panel::WorldPanel;
