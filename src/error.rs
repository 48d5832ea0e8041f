//! Error types and Result aliases for SantaTerm
//!
//! User mistakes (unknown commands, missing files, wrong bio-scan codes) are
//! never errors at this level: they become Error-kind history lines. The
//! variants here cover misuse of the session API and configuration problems.

use std::path::PathBuf;

use crate::models::SessionPhase;

/// Result type alias for SantaTerm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for SantaTerm
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // === Session errors ===
    /// Input arrived while the session was not accepting it
    #[error("Input rejected: session is {phase}")]
    InputRejected { phase: SessionPhase },

    /// A phase change outside the allowed transition table
    #[error("Invalid phase transition from {from} to {to}")]
    InvalidTransition {
        from: SessionPhase,
        to: SessionPhase,
    },

    /// The boot sequence was already launched for this session
    #[error("Session has already been started")]
    AlreadyStarted,

    /// No tokio runtime was available to drive the session timers
    #[error("No tokio runtime available: {reason}")]
    RuntimeUnavailable { reason: String },

    // === Configuration errors ===
    /// An explicitly named configuration file does not exist
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Failed to read configuration file
    #[error("Failed to load config from '{}': {source}", path.display())]
    ConfigLoadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration validation failed
    #[error("Configuration validation failed for '{field}': {reason}")]
    ConfigValidationFailed { field: String, reason: String },

    /// TOML parsing errors
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing errors
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
}
