//! History Line Model
//!
//! Represents one immutable entry of the terminal transcript: an echoed
//! input, command output, an error, or a system message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::markup::Markup;

/// Opaque unique identifier of a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineId(Uuid);

impl LineId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What produced a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// Echo of a submitted line, shown after its prompt
    Input,
    /// Regular command output
    Output,
    /// Error output (rendered red)
    Error,
    /// Boot and system messages
    System,
}

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryLine {
    /// Unique identifier
    pub id: LineId,

    /// Line category
    pub kind: LineKind,

    /// Renderable content
    pub content: Markup,

    /// Prompt label shown before input echoes
    pub prompt: Option<String>,

    /// When this line was appended
    pub timestamp: DateTime<Utc>,
}

impl HistoryLine {
    /// Create a new line with a fresh id
    pub fn new(kind: LineKind, content: Markup) -> Self {
        Self {
            id: LineId::new(),
            kind,
            content,
            prompt: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an input echo with its prompt label
    pub fn input(prompt: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Self::new(LineKind::Input, Markup::Text(content.into()))
        }
    }

    /// Plain text of the content, without the prompt
    pub fn plain_text(&self) -> String {
        self.content.plain_text()
    }
}
