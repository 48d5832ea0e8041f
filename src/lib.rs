//! SantaTerm - a crashed terminal hiding a holiday gift
//!
//! This library provides the session engine behind SantaTerm: a simulated
//! terminal that boots, crashes into an emergency shell, accepts a handful of
//! shell commands and guards a reward behind a bio-scan code. Too many wrong
//! codes trigger an unstoppable self-destruct.
//!
//! ## Module Organization
//!
//! ### Session Engine
//!
//! - [`session`] - The phase state machine and the public [`Session`] handle
//! - [`commands`] - Command parsing and the fixed command table
//! - [`sequence`] - Timed boot, decryption and self-destruct scripts
//! - [`history`] - The append-only transcript
//! - [`events`] - Notifications for the renderer
//!
//! ### Secrets
//!
//! - [`integrity`] - Checksum gate for the bio-scan code
//! - [`payload`] - Decoding of the obfuscated reward text
//!
//! ### Supporting Modules
//!
//! - [`models`] - Phases, transcript lines and their content
//! - [`script`] - Every fixed line of text the terminal prints
//! - [`clock`] - Injectable timer provider
//! - [`config`] - Configuration loading and validation
//! - [`mod@error`] - Error types and Result aliases
//! - [`ui`] - The egui renderer
//!
//! ## Quick Start
//!
//! ```no_run
//! use santaterm::{Session, SessionConfig, SessionPhase};
//!
//! # async fn run() -> santaterm::Result<()> {
//! let session = Session::new(SessionConfig::default())?;
//! session.start()?;
//! session.wait_for_phase(SessionPhase::Ready).await;
//! session.submit("ls")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **Main Thread:** Runs the `egui` UI loop and reads session snapshots
//! - **Tokio Workers:** Run the timed sequencers, one locked step at a time
//!
//! The renderer learns about changes through a `tokio::sync::broadcast`
//! channel of [`SessionEvent`]s; phase changes are also published on a
//! `tokio::sync::watch` channel.

#[macro_use]
extern crate tracing;

pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod history;
pub mod integrity;
pub mod models;
pub mod payload;
pub mod script;
pub mod sequence;
pub mod session;

// UI modules
pub mod ui;

// Re-exports for core functionality
pub use clock::{Clock, InstantClock, TokioClock};
pub use config::loader::ConfigLoader;
pub use config::Config;
pub use error::{Error, Result};
pub use events::SessionEvent;
pub use models::{HistoryLine, LineKind, Markup, SessionPhase, Tone};
pub use session::{Session, SessionConfig, SessionSnapshot};

// Version information
/// The current version of SantaTerm from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The application description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Load configuration, falling back to defaults when it cannot be used
///
/// An explicit path that fails to load is reported as a warning rather than
/// aborting startup; the terminal always boots.
pub fn load_config(path: Option<&std::path::Path>) -> Config {
    match ConfigLoader::load(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}", handle_startup_error(&e));
            info!("Falling back to default configuration");
            Config::default()
        }
    }
}

/// Human-readable description of a startup failure
pub fn handle_startup_error(error: &Error) -> String {
    match error {
        Error::ConfigNotFound { path } => {
            format!(
                "Configuration Error: No config file at '{}'",
                path.display()
            )
        }
        Error::ConfigLoadFailed { path, source } => {
            format!(
                "Configuration Error: Failed to load config from '{}': {}",
                path.display(),
                source
            )
        }
        Error::Toml(e) => format!("Configuration Error: Invalid TOML: {}", e),
        Error::Json(e) => format!("Configuration Error: Invalid JSON: {}", e),
        Error::ConfigValidationFailed { field, reason } => {
            format!(
                "Configuration Error: Validation failed for '{}': {}",
                field, reason
            )
        }
        Error::RuntimeUnavailable { reason } => {
            format!("Runtime Error: {}", reason)
        }
        _ => format!("Unexpected Error: {}", error),
    }
}
