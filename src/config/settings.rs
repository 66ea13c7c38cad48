//! Configuration settings for the Game of Life simulator

use crate::error::LifeError;
use crate::sim::PacingMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub pacing: PacingConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    /// Seed each cell alive with probability 0.5 instead of starting empty.
    pub seeded: bool,
    /// Fixed RNG seed for reproducible starting grids.
    pub seed: Option<u64>,
}

/// Pacing policy between generations, mirroring the `--timer` flag: a fixed
/// interval in seconds, or blocking until the user acknowledges each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PacingConfig {
    FixedInterval { seconds: f64 },
    WaitForSignal,
}

impl PacingConfig {
    /// Convert to the runtime pacing mode, rejecting non-positive intervals.
    pub fn to_mode(&self) -> Result<PacingMode, LifeError> {
        match *self {
            PacingConfig::FixedInterval { seconds } => {
                if seconds > 0.0 && seconds.is_finite() {
                    Ok(PacingMode::FixedInterval(Duration::from_secs_f64(seconds)))
                } else {
                    Err(LifeError::InvalidTimerValue { seconds })
                }
            }
            PacingConfig::WaitForSignal => Ok(PacingMode::WaitForSignal),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub frontend: FrontendKind,
    /// Cell edge length in pixels, used by the window front-end.
    pub cell_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontendKind {
    Terminal,
    Window,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 30,
                height: 30,
                seeded: true,
                seed: None,
            },
            pacing: PacingConfig::WaitForSignal,
            display: DisplayConfig {
                frontend: FrontendKind::Terminal,
                cell_size: 10,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(LifeError::InvalidDimension {
                width: self.grid.width,
                height: self.grid.height,
            }
            .into());
        }

        if let PacingConfig::FixedInterval { seconds } = self.pacing {
            if !(seconds > 0.0 && seconds.is_finite()) {
                return Err(LifeError::InvalidTimerValue { seconds }.into());
            }
        }

        if self.display.cell_size == 0 {
            anyhow::bail!("Cell size must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some((width, height)) = cli_overrides.dims {
            self.grid.width = width;
            self.grid.height = height;
        }
        if let Some(seconds) = cli_overrides.timer {
            self.pacing = PacingConfig::FixedInterval { seconds };
        }
        if let Some(seed) = cli_overrides.seed {
            self.grid.seed = Some(seed);
        }
        if cli_overrides.empty {
            self.grid.seeded = false;
        }
        if cli_overrides.window {
            self.display.frontend = FrontendKind::Window;
        }
        if let Some(cell_size) = cli_overrides.cell_size {
            self.display.cell_size = cell_size;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dims: Option<(usize, usize)>,
    pub timer: Option<f64>,
    pub seed: Option<u64>,
    pub empty: bool,
    pub window: bool,
    pub cell_size: Option<u32>,
}
