//! The simulator collaborator boundary.

use glam::IVec2;

use crate::error::MissingAgent;
use crate::sim::{CellField, Patch};

/// Read-only query surface of the external simulation engine.
///
/// Both calls are synchronous and owned by the simulator; the viewer never
/// batches or parallelizes them, and never caches their results across
/// frames.
pub trait WorldSource {
    /// All patches with `lower <= position < upper` (patch units) that
    /// currently exist in the world.
    fn query_patches(&self, lower: IVec2, upper: IVec2) -> Vec<Patch>;

    /// The agent's current local vision buffer: a field of extent
    /// `2 * vision_range + 1` with the agent's own cell at the center.
    fn agent_vision(&self, agent_id: u64) -> Result<CellField, MissingAgent>;
}
