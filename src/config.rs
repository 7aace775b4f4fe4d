//! Simulator-facing configuration and viewer settings.
//!
//! [`SimulatorConfig`] is constructed once by the caller (typically by the
//! environment-registration layer that also owns reward computation) and is
//! read-only to the viewer. [`ViewerSettings`] are presentation knobs owned
//! by the viewer itself, loaded from multiple sources (lowest to highest
//! priority):
//! 1. Compiled defaults
//! 2. `scentscape.ron` file (if exists)
//! 3. Environment variables prefixed with `SCENTSCAPE_`
//!
//! Example environment variable: `SCENTSCAPE_WINDOW__WIDTH=1600`

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Color triple in `[0, 1]`.
pub type Rgb = [f32; 3];

/// One entry of the world's item roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    /// Display name, used in logs only.
    pub name: String,
    /// Glyph fill color.
    pub color: Rgb,
    /// Blocking items render as unit squares, everything else as discs.
    pub blocks_movement: bool,
}

/// Immutable description of the simulated world, shared with the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Cells per patch edge. Must be positive.
    pub patch_size: u32,
    /// Half-width of an agent's local vision window, in cells.
    pub vision_range: u32,
    /// Half-width of the ground-truth vision layer, in cells.
    pub gt_vision_range: u32,
    /// Fill color of agent glyphs in both panels.
    pub agent_color: Rgb,
    /// Item roster; patch items index into this, in order.
    pub items: Vec<ItemType>,
}

impl SimulatorConfig {
    /// Look up an item type by its roster index.
    pub fn item(&self, index: usize) -> Option<&ItemType> {
        self.items.get(index)
    }
}

/// Window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSettings {
    pub title: String,
    /// Initial window width in logical pixels.
    pub width: u32,
    /// Initial window height in logical pixels.
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Scentscape".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Panel layout and line styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelSettings {
    /// Fraction of the window width given to the egocentric panel.
    pub agent_panel_fraction: f32,
    /// Grid-line width in UI points.
    pub grid_line_width: f32,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            agent_panel_fraction: 0.5,
            grid_line_width: 0.4,
        }
    }
}

/// Viewer presentation settings with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewerSettings {
    #[serde(default)]
    pub window: WindowSettings,

    #[serde(default)]
    pub panels: PanelSettings,
}

impl ViewerSettings {
    /// Load settings with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `scentscape.ron` file (if exists)
    /// 3. Environment variables prefixed with `SCENTSCAPE_` (highest priority)
    pub fn load() -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("window.title", "Scentscape")?
            .set_default("window.width", 1280_i64)?
            .set_default("window.height", 720_i64)?
            .set_default("panels.agent_panel_fraction", 0.5)?
            .set_default("panels.grid_line_width", 0.4)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name("scentscape")
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (SCENTSCAPE_WINDOW__WIDTH, etc.)
            .add_source(Environment::with_prefix("SCENTSCAPE").separator("__"));

        let settings = builder.build().context("Failed to build viewer settings")?;

        settings
            .try_deserialize()
            .context("Failed to deserialize viewer settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ViewerSettings::default();
        assert_eq!(settings.window.width, 1280);
        assert_eq!(settings.window.height, 720);
        assert_eq!(settings.panels.agent_panel_fraction, 0.5);
        assert_eq!(settings.panels.grid_line_width, 0.4);
    }

    #[test]
    fn test_load_settings_with_defaults() {
        // Should load defaults when no settings file exists
        let settings = ViewerSettings::load().expect("Failed to load settings");
        assert_eq!(settings.window.title, "Scentscape");
        assert_eq!(settings.panels.agent_panel_fraction, 0.5);
    }

    #[test]
    fn test_simulator_config_ron_round_trip() {
        let config = SimulatorConfig {
            patch_size: 16,
            vision_range: 4,
            gt_vision_range: 8,
            agent_color: [0.0, 0.0, 1.0],
            items: vec![
                ItemType {
                    name: "jellybean".to_string(),
                    color: [0.0, 0.0, 1.0],
                    blocks_movement: false,
                },
                ItemType {
                    name: "wall".to_string(),
                    color: [0.5, 0.5, 0.5],
                    blocks_movement: true,
                },
            ],
        };
        let text = ron::ser::to_string(&config).expect("serialize");
        let back: SimulatorConfig = ron::de::from_str(&text).expect("deserialize");
        assert_eq!(back, config);
    }

    #[test]
    fn test_item_lookup() {
        let config = SimulatorConfig {
            patch_size: 32,
            vision_range: 5,
            gt_vision_range: 10,
            agent_color: [0.0, 0.0, 1.0],
            items: vec![ItemType {
                name: "wall".to_string(),
                color: [0.5, 0.5, 0.5],
                blocks_movement: true,
            }],
        };
        assert_eq!(config.item(0).unwrap().name, "wall");
        assert!(config.item(1).is_none());
    }
}
