use std::fs;
use std::path::Path;
use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MATCH_WINDOW_MS: u64 = 1500;
pub const DEFAULT_EXPIRY_WINDOW_MS: u64 = 3000;
pub const DEFAULT_SMOOTHING_ALPHA: f32 = 0.6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Tracks unseen for longer than this are skipped when matching.
    pub match_window_ms: u64,
    /// Tracks unseen for longer than this are deleted.
    pub expiry_window_ms: u64,
    /// Weight given to history when smoothing expressions.
    pub smoothing_alpha: f32,
}

impl TrackerConfig {
    pub fn new() -> Self {
        TrackerConfig {
            match_window_ms: DEFAULT_MATCH_WINDOW_MS,
            expiry_window_ms: DEFAULT_EXPIRY_WINDOW_MS,
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
        }
    }

    /// from_json_str parses a config, filling omitted fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: TrackerConfig = serde_json::from_str(json)
            .context("failed to parse tracker config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read tracker config {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.smoothing_alpha) {
            return Err(Error::msg(format!(
                "smoothing_alpha must be within [0, 1], got {}",
                self.smoothing_alpha
            )))
        }
        if self.expiry_window_ms < self.match_window_ms {
            return Err(Error::msg(format!(
                "expiry_window_ms ({}) must not be shorter than match_window_ms ({})",
                self.expiry_window_ms, self.match_window_ms
            )))
        }
        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SnapshotConfig {
    pub box_precision: f32,
    pub pretty: bool,
}

impl SnapshotConfig {
    pub fn new() -> Self {
        SnapshotConfig {
            box_precision: 0.1,
            pretty: true,
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        SnapshotConfig::new()
    }
}
