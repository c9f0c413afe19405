use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Largest accepted grid side; keeps every cell coordinate well inside `i32`
pub const MAX_GRID_SIDE: usize = 4096;

/// How many due replay steps a single poll may consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepPolicy {
    /// At most one command per poll; leftover time is clamped below one interval
    #[default]
    Single,
    /// Apply every command whose interval has fully elapsed
    CatchUp,
}

/// Reasons a configuration cannot be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("grid sides must be at most {max}, got {width}x{height}")]
    GridTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("treasure count must be at least 1")]
    NoTreasures,

    #[error("{count} treasures do not fit in the {free} cells next to the robot")]
    TooManyTreasures { count: usize, free: usize },

    #[error("step interval must be greater than zero")]
    ZeroStepInterval,

    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Number of treasures placed each round
    pub treasure_count: usize,
    /// Delay between two replayed commands, in milliseconds
    pub step_interval_ms: u64,
    /// How the replay treats polls that arrive late
    pub step_policy: StepPolicy,
    /// How long the victory banner stays up before the next round
    pub victory_pause_ms: u64,
    /// Random draws per treasure before falling back to scanning free cells
    pub max_resample_attempts: usize,
    /// Fixed RNG seed; a fresh entropy seed is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 13,
            grid_height: 8,
            treasure_count: 5,
            step_interval_ms: 800,
            step_policy: StepPolicy::Single,
            victory_pause_ms: 3000,
            max_resample_attempts: 64,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small seeded grid for testing
    pub fn small() -> Self {
        Self {
            seed: Some(7),
            ..Self::new(5, 5)
        }
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    pub fn victory_pause(&self) -> Duration {
        Duration::from_millis(self.victory_pause_ms)
    }

    /// Check that a round can actually be set up with these values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                max: MAX_GRID_SIDE,
            });
        }
        if self.treasure_count == 0 {
            return Err(ConfigError::NoTreasures);
        }

        // The robot always occupies one cell
        let free = self
            .grid_width
            .checked_mul(self.grid_height)
            .map_or(usize::MAX, |cells| cells - 1);
        if self.treasure_count > free {
            return Err(ConfigError::TooManyTreasures {
                count: self.treasure_count,
                free,
            });
        }
        if self.step_interval_ms == 0 {
            return Err(ConfigError::ZeroStepInterval);
        }

        Ok(())
    }

    /// Load and validate a TOML config file; missing keys keep their defaults
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
