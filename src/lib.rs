//! # Scentscape
//!
//! Interactive map viewer for unbounded, patch-streamed grid worlds: a
//! three-channel scent field, collectible and blocking items, directional
//! agents, and an egocentric view of the acting agent.
//!
//! The simulation engine is an external collaborator reached through
//! [`sim::WorldSource`]; this crate owns only the rendering pipeline and
//! the interactive display loop.

pub mod config;
pub mod error;
pub mod render;
pub mod sim;
pub mod viewer;

pub use viewer::{MapViewer, ACTING_AGENT_ID};

/// Common imports for downstream use
pub mod prelude {
    pub use crate::config::{ItemType, Rgb, SimulatorConfig, ViewerSettings};
    pub use crate::error::{MissingAgent, ViewerError};
    pub use crate::render::{PatchBox, Viewport};
    pub use crate::sim::{
        demo_config, AgentPose, CellField, DemoWorld, Direction, ItemInstance, Patch, WorldSource,
    };
    pub use crate::viewer::{MapViewer, ACTING_AGENT_ID};
}
