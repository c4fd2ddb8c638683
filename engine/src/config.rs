#[cfg(feature = "json")]
use anyhow::Context;
use anyhow::{Result, ensure};
#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::constants::*;

// ============================================================================
// Simulation Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize), serde(default))]
pub struct SimConfig {
    pub seed: u64,
    pub world_depth: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub camera_margin: f32,
    pub phase_x: f32,
    pub arena_offset: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            world_depth: DEFAULT_WORLD_DEPTH,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            camera_margin: DEFAULT_CAMERA_MARGIN,
            phase_x: DEFAULT_PHASE_X,
            arena_offset: DEFAULT_ARENA_OFFSET,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.world_depth > 0.0, "world_depth must be positive, got {}", self.world_depth);
        ensure!(
            self.viewport_width > 0.0 && self.viewport_height > 0.0,
            "viewport must have a positive size"
        );
        ensure!(
            self.camera_margin >= 0.0 && self.camera_margin * 2.0 < self.viewport_width,
            "camera_margin {} leaves no room inside a {} wide viewport",
            self.camera_margin,
            self.viewport_width
        );
        ensure!(self.arena_offset >= 0.0, "arena_offset must not be negative");
        Ok(())
    }

    #[cfg(feature = "json")]
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("Failed to parse simulation config")?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "json")]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid config in {}", path.display()))
    }
}
