//! Core data models for SantaTerm
//!
//! This module contains the data structures shared between the session
//! engine and the renderer: the session phase, transcript lines and their
//! renderer-neutral content, and the failed-attempt counter.

pub mod failure;
pub mod history_line;
pub mod markup;
pub mod phase;

// Re-exports for convenience
pub use failure::{FailureCounter, FailureVerdict};
pub use history_line::{HistoryLine, LineId, LineKind};
pub use markup::{Markup, RunId, Tone};
pub use phase::SessionPhase;
