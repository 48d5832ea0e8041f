//! Configuration management for SantaTerm
//!
//! Configuration is optional: every field has a default matching the
//! stock experience, and a file only needs to name what it changes.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::models::failure::DEFAULT_FAILURE_THRESHOLD;

/// Main configuration structure for SantaTerm
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Session behavior
    pub session: SessionSettings,

    /// Animation timing
    pub timing: TimingConfig,

    /// Window and font settings
    pub ui: UiConfig,
}

impl Config {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.session.user.trim().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "session.user".to_string(),
                reason: "User name cannot be empty".to_string(),
            });
        }

        if self.session.failure_threshold == 0 {
            return Err(Error::ConfigValidationFailed {
                field: "session.failure_threshold".to_string(),
                reason: "At least one attempt must be allowed".to_string(),
            });
        }

        if !(self.timing.speed.is_finite() && self.timing.speed > 0.0) {
            return Err(Error::ConfigValidationFailed {
                field: "timing.speed".to_string(),
                reason: "Speed must be a positive number".to_string(),
            });
        }

        if self.timing.decryption_tick_ms == 0 {
            return Err(Error::ConfigValidationFailed {
                field: "timing.decryption_tick_ms".to_string(),
                reason: "Tick interval must be greater than 0".to_string(),
            });
        }

        if !(8.0..=72.0).contains(&self.ui.font_size) {
            return Err(Error::ConfigValidationFailed {
                field: "ui.font_size".to_string(),
                reason: "Font size must be between 8 and 72".to_string(),
            });
        }

        Ok(())
    }
}

/// Session-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// User name shown by `whoami` and in the prompt
    pub user: String,

    /// Host name shown in the prompt
    pub host: String,

    /// Wrong codes allowed before the self-destruct
    pub failure_threshold: u32,

    /// Fixed random seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            user: "vyshak".to_string(),
            host: "santa-server".to_string(),
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            seed: None,
        }
    }
}

/// Timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Playback speed multiplier (2.0 plays twice as fast)
    pub speed: f64,

    /// Interval between decryption ticks in milliseconds
    pub decryption_tick_ms: u64,
}

impl TimingConfig {
    /// Decryption tick interval
    pub fn decryption_tick(&self) -> Duration {
        Duration::from_millis(self.decryption_tick_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            decryption_tick_ms: 100,
        }
    }
}

/// UI-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Monospace font size in points
    pub font_size: f32,

    /// Initial window width
    pub window_width: f32,

    /// Initial window height
    pub window_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            font_size: 18.0,
            window_width: 960.0,
            window_height: 640.0,
        }
    }
}
