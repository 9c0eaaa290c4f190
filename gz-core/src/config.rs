//! Unified configuration schema for the engine.
//!
//! The same YAML file is shared between the search workers and the
//! surrounding tooling; only the sections relevant to the tree live here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Search / tree policy settings.
    pub search: SearchConfig,
    /// NDJSON telemetry settings.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Search policy configuration consumed by the tree.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Always admit the pass move as an expansion candidate instead of
    /// gating it on the net winrate and the board count.
    #[serde(default)]
    pub dumb_pass: bool,

    /// Fraction of the most-visited root child's visits a sibling needs
    /// before it can win the final-move comparator on its lower
    /// confidence bound.
    #[serde(default = "default_lcb_min_visit_ratio")]
    pub lcb_min_visit_ratio: f32,
}

fn default_lcb_min_visit_ratio() -> f32 {
    0.10
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            dumb_pass: false,
            lcb_min_visit_ratio: default_lcb_min_visit_ratio(),
        }
    }
}

/// Telemetry sink configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// NDJSON event file. Absent disables event logging.
    #[serde(default)]
    pub events_path: Option<PathBuf>,
    /// Flush the event writer every N lines; 0 disables periodic flushing.
    #[serde(default)]
    pub flush_every_lines: u64,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
