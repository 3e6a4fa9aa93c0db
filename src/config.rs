// Grid configuration
// Host-tunable knobs for scale, snapping and week layout

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::time::SNAP_MINUTES;

/// Tunable parameters of the day grid
///
/// Geometry constants the layout invariants depend on (column width cap,
/// gutter, minimum block height) are fixed in the layout module and not
/// configurable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Vertical scale of the grid
    pub pixels_per_hour: f32,
    /// Gesture quantization step
    pub snap_minutes: u32,
    /// Shortest duration a resize may produce
    pub min_event_minutes: i64,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            pixels_per_hour: 60.0,
            snap_minutes: SNAP_MINUTES,
            min_event_minutes: 15,
            first_day_of_week: 1, // Monday
        }
    }
}

impl GridConfig {
    /// Parse a configuration from TOML text
    ///
    /// Missing fields fall back to their defaults; values are validated.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GridConfig =
            toml::from_str(text).context("Failed to parse grid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// Check the configuration for usable values
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.pixels_per_hour.is_finite() && self.pixels_per_hour > 0.0,
            "pixels_per_hour must be positive"
        );
        ensure!(
            (1..=60).contains(&self.snap_minutes) && 60 % self.snap_minutes == 0,
            "snap_minutes must divide an hour evenly"
        );
        ensure!(
            self.min_event_minutes >= 1,
            "min_event_minutes must be at least 1"
        );
        ensure!(
            self.first_day_of_week <= 6,
            "first_day_of_week must be 0..=6"
        );
        Ok(())
    }
}
