//! The viewport/redraw controller.
//!
//! [`MapViewer`] owns the window, the camera viewport, and the draw cycle.
//! `draw()` is synchronous: it queries the world source for every patch
//! covering the current viewport, renders both panels, presents the frame,
//! and reads the world plot's bounds back as the new viewport so
//! interactive pan/zoom survives into the next cycle. Internally each draw
//! yields to the windowing system for a bounded, effectively-zero interval;
//! it never waits for input.
//!
//! A viewer is owned by a single thread and is not `Send`; concurrent draws
//! on one instance are a caller contract violation by construction.

mod surface;

use std::time::Duration;

use glam::DVec2;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::{SimulatorConfig, ViewerSettings};
use crate::error::ViewerError;
use crate::render::{AgentPanel, PatchBox, Viewport, WorldPanel};
use crate::sim::WorldSource;
use surface::{graphics_available, DisplaySurface};

/// The reserved identity of the agent shown in the egocentric panel.
pub const ACTING_AGENT_ID: u64 = 0;

/// Everything tied to the native window. The surface is declared before the
/// window so it is dropped first (fields drop in declaration order).
struct WindowShell {
    surface: DisplaySurface,
    window: Window,
    egui_state: egui_winit::State,
    close_requested: bool,
}

impl ApplicationHandler for WindowShell {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // Window and surface are created in MapViewer::new; the pump loop
        // never re-suspends on desktop platforms.
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let _ = self.egui_state.on_window_event(&self.window, &event);

        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                self.surface.resize(size.width, size.height);
            }
            _ => {}
        }
    }
}

/// Interactive dual-panel map viewer over an external world source.
pub struct MapViewer {
    config: SimulatorConfig,
    settings: ViewerSettings,
    viewport: Viewport,
    /// Set by `set_viewbox`; consumed by the next draw to pin the camera.
    pending_viewbox: Option<Viewport>,
    show_agent_view: bool,
    world_panel: WorldPanel,
    agent_panel: AgentPanel,
    egui_ctx: egui::Context,
    shell: WindowShell,
    event_loop: EventLoop<()>,
    frames: u64,
}

impl MapViewer {
    /// Bring up the window and GPU surface.
    ///
    /// The graphics capability is probed first; any failure in the chain
    /// surfaces as [`ViewerError::GraphicsUnavailable`] before a single
    /// frame can be drawn. The window title comes from `settings`.
    pub fn new(
        config: SimulatorConfig,
        settings: ViewerSettings,
        bottom_left: DVec2,
        top_right: DVec2,
        show_agent_view: bool,
    ) -> Result<Self, ViewerError> {
        if !graphics_available() {
            return Err(ViewerError::GraphicsUnavailable(
                "no usable GPU adapter".to_string(),
            ));
        }

        let event_loop = EventLoop::new()
            .map_err(|e| ViewerError::GraphicsUnavailable(format!("event loop: {e}")))?;

        let window_attrs = WindowAttributes::default()
            .with_title(&settings.window.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                settings.window.width,
                settings.window.height,
            ));
        // Create the window up front rather than from `resumed`; the viewer
        // drives the loop in pump mode, one bounded pump per draw.
        #[allow(deprecated)]
        let window = event_loop
            .create_window(window_attrs)
            .map_err(|e| ViewerError::GraphicsUnavailable(format!("window: {e}")))?;

        let surface = pollster::block_on(DisplaySurface::new(&window))
            .map_err(|e| ViewerError::GraphicsUnavailable(e.to_string()))?;

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let viewport = Viewport::new(bottom_left, top_right);
        log::info!(
            "map viewer up: {}x{}, viewbox {:?}..{:?}, agent view {}",
            settings.window.width,
            settings.window.height,
            bottom_left,
            top_right,
            if show_agent_view { "on" } else { "off" }
        );

        Ok(Self {
            world_panel: WorldPanel::new(settings.panels.grid_line_width),
            agent_panel: AgentPanel::new(settings.panels.grid_line_width),
            config,
            settings,
            viewport,
            pending_viewbox: Some(viewport),
            show_agent_view,
            egui_ctx,
            shell: WindowShell {
                surface,
                window,
                egui_state,
                close_requested: false,
            },
            event_loop,
            frames: 0,
        })
    }

    /// Current camera bounds.
    pub fn viewbox(&self) -> (DVec2, DVec2) {
        (self.viewport.bottom_left, self.viewport.top_right)
    }

    /// Overwrite the camera bounds; takes effect on the next draw.
    pub fn set_viewbox(&mut self, bottom_left: DVec2, top_right: DVec2) {
        let view = Viewport::new(bottom_left, top_right);
        self.viewport = view;
        self.pending_viewbox = Some(view);
    }

    /// Render one frame from `source`.
    ///
    /// Fails with [`ViewerError::SurfaceClosed`], before any rendering, if
    /// the window was closed since the last call. A missing acting agent
    /// only skips the egocentric panel's update for this frame.
    pub fn draw(&mut self, source: &impl WorldSource) -> Result<(), ViewerError> {
        if self.shell.close_requested {
            return Err(ViewerError::SurfaceClosed);
        }

        // Bounded yield to the windowing system so input, resize and close
        // events flow while the caller drives the frame rate.
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.shell);
        if matches!(status, PumpStatus::Exit(_)) {
            self.shell.close_requested = true;
        }
        if self.shell.close_requested {
            return Err(ViewerError::SurfaceClosed);
        }

        let tile = PatchBox::enclosing(self.viewport, self.config.patch_size);
        let patches = source.query_patches(tile.lower, tile.upper);
        log::debug!(
            "frame {}: {} patches in {:?}..{:?}",
            self.frames,
            patches.len(),
            tile.lower,
            tile.upper
        );

        let vision = if self.show_agent_view {
            match source.agent_vision(ACTING_AGENT_ID) {
                Ok(field) => Some(field),
                Err(missing) => {
                    log::debug!("egocentric panel left as-is: {missing}");
                    None
                }
            }
        } else {
            None
        };

        self.world_panel.prepare(&self.egui_ctx, &patches);
        if self.show_agent_view {
            self.agent_panel.prepare(&self.egui_ctx, vision.as_ref());
        }

        let raw_input = self.shell.egui_state.take_egui_input(&self.shell.window);
        let pending = self.pending_viewbox.take();
        let mut seen_viewport = self.viewport;

        let world_panel = &self.world_panel;
        let agent_panel = &self.agent_panel;
        let config = &self.config;
        let agent_panel_fraction = self.settings.panels.agent_panel_fraction;
        let show_agent_view = self.show_agent_view;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if show_agent_view {
                let panel_width = ctx.screen_rect().width() * agent_panel_fraction;
                egui::SidePanel::right("agent_view_panel")
                    .resizable(false)
                    .exact_width(panel_width)
                    .show(ctx, |ui| {
                        agent_panel.show(ui, config);
                    });
            }
            egui::CentralPanel::default().show(ctx, |ui| {
                seen_viewport = world_panel.show(ui, config, &patches, pending);
            });
        });

        self.shell
            .egui_state
            .handle_platform_output(&self.shell.window, full_output.platform_output);
        self.shell.surface.render(
            &self.egui_ctx,
            full_output.textures_delta,
            full_output.shapes,
            full_output.pixels_per_point,
        )?;

        // The plot has already folded this frame's pan/zoom into its bounds;
        // keep them as the viewport for the next cycle.
        self.viewport = seen_viewport;
        self.frames += 1;
        Ok(())
    }

    /// Explicitly release the window and GPU surface. Dropping the viewer
    /// does the same; this just names the intent.
    pub fn close(self) {
        log::info!("map viewer closed after {} frames", self.frames);
    }
}
