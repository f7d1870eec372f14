//! Run tuning loaded from an optional JSON file.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```json
//! { "gauge_decay_per_sec": 20.0, "swap_cooldown_ms": 800.0 }
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value `{field}`: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Tunable numbers for one run. Field names match the JSON keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Gauge capacity, refilled on every form switch.
    pub max_gauge: f64,
    /// Gauge drained per second of run time.
    pub gauge_decay_per_sec: f64,
    /// Lockout after a form switch.
    pub swap_cooldown_ms: f64,
    /// Score earned per millisecond at multiplier x1.
    pub score_per_ms: f64,
    /// Energized switches needed for each multiplier step.
    pub swaps_per_multiplier: u32,
    /// Run time between scroll speed increases.
    pub speed_ramp_interval_ms: u64,
    pub speed_ramp_factor: f64,
    /// Scroll speed in px/s at run start.
    pub initial_scroll_speed: f64,
    pub initial_spawn_interval_ms: f64,
    pub min_spawn_interval_ms: f64,
    /// Obstacle slots per lane.
    pub pool_capacity: usize,
    /// Delay between lanes in a chaos pattern.
    pub chaos_stagger_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_gauge: 100.0,
            gauge_decay_per_sec: 30.0,
            swap_cooldown_ms: 1000.0,
            score_per_ms: 0.1,
            swaps_per_multiplier: 2,
            speed_ramp_interval_ms: 3000,
            speed_ramp_factor: 1.02,
            initial_scroll_speed: 200.0,
            initial_spawn_interval_ms: 2000.0,
            min_spawn_interval_ms: 800.0,
            pool_capacity: 10,
            chaos_stagger_ms: 200,
        }
    }
}

impl RunConfig {
    /// Parse and validate a JSON document. `origin` names the source in errors.
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: RunConfig =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json, &path.display().to_string())
    }

    /// Platform config location, e.g. `~/.config/laneshift/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "laneshift").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from `explicit` if given, else from the default path if that file
    /// exists, else fall back to defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            info!(path = %path.display(), "loading run config");
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                info!(path = %path.display(), "loading run config");
                Self::load(&path)
            }
            _ => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                message: message.into(),
            }
        }

        if !(self.max_gauge > 0.0) {
            return Err(invalid("max_gauge", "must be positive"));
        }
        if !(self.gauge_decay_per_sec >= 0.0) {
            return Err(invalid("gauge_decay_per_sec", "must not be negative"));
        }
        if !(self.swap_cooldown_ms >= 0.0) {
            return Err(invalid("swap_cooldown_ms", "must not be negative"));
        }
        if !(self.score_per_ms >= 0.0) {
            return Err(invalid("score_per_ms", "must not be negative"));
        }
        if self.swaps_per_multiplier == 0 {
            return Err(invalid("swaps_per_multiplier", "must be at least 1"));
        }
        if self.speed_ramp_interval_ms == 0 {
            return Err(invalid("speed_ramp_interval_ms", "must be positive"));
        }
        if !(self.speed_ramp_factor >= 1.0) {
            return Err(invalid(
                "speed_ramp_factor",
                "must be at least 1.0 so scroll speed never decreases",
            ));
        }
        if !(self.initial_scroll_speed > 0.0) {
            return Err(invalid("initial_scroll_speed", "must be positive"));
        }
        if !(self.min_spawn_interval_ms > 0.0) {
            return Err(invalid("min_spawn_interval_ms", "must be positive"));
        }
        if !(self.initial_spawn_interval_ms >= self.min_spawn_interval_ms) {
            return Err(invalid(
                "initial_spawn_interval_ms",
                format!(
                    "must be at least min_spawn_interval_ms ({})",
                    self.min_spawn_interval_ms
                ),
            ));
        }
        if self.chaos_stagger_ms as f64 > self.min_spawn_interval_ms {
            return Err(invalid(
                "chaos_stagger_ms",
                format!(
                    "must not exceed min_spawn_interval_ms ({})",
                    self.min_spawn_interval_ms
                ),
            ));
        }
        if self.pool_capacity == 0 {
            return Err(invalid("pool_capacity", "must be at least 1"));
        }
        Ok(())
    }
}
