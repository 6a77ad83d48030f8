use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{MorseBlinkError, Result};

/// Message encoded in the bundled audio clip.
pub const DEFAULT_MESSAGE: &str = "SOS";
/// Length of one dot in the bundled clip.
pub const DEFAULT_UNIT_SECONDS: f64 = 0.1;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;
pub const START_LABEL: &str = "Play Morse Code";
pub const PLAYING_LABEL: &str = "Pause";

/// Top-level configuration structure for the application.
///
/// The defaults describe the bundled clip. A preset file only needs to list
/// the fields it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub message: String,
    pub timing: TimingConfig,
    pub labels: LabelConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            timing: TimingConfig::default(),
            labels: LabelConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads a JSON preset and validates it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.timing.validate()
    }
}

/// Timing constants shared by the schedule and the poll loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Seconds per Morse unit; must match the audio encoding.
    pub unit_seconds: f64,
    /// Wall-clock cadence of the reconciliation pass.
    pub poll_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            unit_seconds: DEFAULT_UNIT_SECONDS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl TimingConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.unit_seconds.is_finite() || self.unit_seconds <= 0.0 {
            return Err(MorseBlinkError::config(format!(
                "unit_seconds must be a positive number, got {}",
                self.unit_seconds
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(MorseBlinkError::config(
                "poll_interval_ms must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Text shown on the play/pause control.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LabelConfig {
    pub start: String,
    pub playing: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            start: START_LABEL.to_string(),
            playing: PLAYING_LABEL.to_string(),
        }
    }
}
