use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square, wrap-around grid
    pub grid_size: usize,
    /// Milliseconds between two simulation steps
    pub tick_interval_ms: u64,
    /// Terminal columns used to draw one grid cell
    pub cell_width: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 32,
            tick_interval_ms: 100,
            cell_width: 2,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_size >= 2,
            "grid size must be at least 2, got {}",
            self.grid_size
        );
        ensure!(
            self.grid_size <= i32::MAX as usize,
            "grid size {} is too large",
            self.grid_size
        );
        ensure!(self.tick_interval_ms > 0, "tick interval must be positive");
        ensure!(self.cell_width > 0, "cell width must be positive");
        Ok(())
    }
}
