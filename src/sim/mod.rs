//! World-facing data model and the simulator query boundary.

mod demo;
mod direction;
mod patch;
mod source;

pub use demo::{demo_config, DemoWorld};
pub use direction::Direction;
pub use patch::{AgentPose, CellField, ItemInstance, Patch};
pub use source::WorldSource;
