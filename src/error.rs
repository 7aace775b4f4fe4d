//! Error types surfaced by the viewer.

use thiserror::Error;

/// Failures of the viewport/redraw controller.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The graphics stack (event loop, adapter, or device) could not be
    /// brought up. Raised at construction, before any drawing is attempted.
    #[error("graphics stack unavailable: {0}")]
    GraphicsUnavailable(String),

    /// The display window was closed externally since the last call. Not
    /// auto-recovered; the caller decides whether to reconstruct.
    #[error("the display surface is closed")]
    SurfaceClosed,

    /// The swapchain refused to hand out a frame.
    #[error("failed to acquire a frame from the display surface")]
    FrameAcquire(#[from] wgpu::SurfaceError),
}

/// The requested agent does not currently exist in the simulation.
///
/// Non-fatal: when the acting agent is absent, the egocentric panel skips
/// its update for that frame and `draw()` still succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("agent {0} is not present in the simulation")]
pub struct MissingAgent(pub u64);
