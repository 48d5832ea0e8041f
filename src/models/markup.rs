//! Line Content Model
//!
//! Renderer-neutral content for transcript lines. The session engine never
//! touches a UI toolkit; it describes styled fragments with [`Markup`] and
//! the renderer maps each [`Tone`] onto its own palette.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of one decryption run, shared by its monitor line and its view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual emphasis requested for a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tone {
    /// Inherit the line's color
    #[default]
    Plain,
    /// Dimmed informational text
    Muted,
    /// Yellow warning text
    Warning,
    /// Red error text
    Danger,
    /// Blue accent (file names, greetings)
    Accent,
    /// Faded hint text
    Hint,
    /// Large pulsing headline
    Headline,
    /// Inverted, boxed text
    Highlight,
}

/// Content of a single transcript line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Markup {
    /// Plain text in the line's color
    Text(String),
    /// Text with an explicit tone
    Styled { tone: Tone, text: String },
    /// Multi-line text whose whitespace must be preserved
    Preformatted(String),
    /// Children stacked vertically
    Column(Vec<Markup>),
    /// Children laid out horizontally
    Row(Vec<Markup>),
    /// Progress of one decryption run, filled in from the session snapshot
    DecryptionMonitor { run: RunId },
}

impl Markup {
    /// Plain text fragment
    pub fn text(text: impl Into<String>) -> Self {
        Markup::Text(text.into())
    }

    /// Styled text fragment
    pub fn styled(tone: Tone, text: impl Into<String>) -> Self {
        Markup::Styled {
            tone,
            text: text.into(),
        }
    }

    /// Flatten to plain text. Columns join with newlines, rows with two spaces.
    pub fn plain_text(&self) -> String {
        match self {
            Markup::Text(text) | Markup::Preformatted(text) => text.clone(),
            Markup::Styled { text, .. } => text.clone(),
            Markup::Column(children) => children
                .iter()
                .map(Markup::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Markup::Row(children) => children
                .iter()
                .map(Markup::plain_text)
                .collect::<Vec<_>>()
                .join("  "),
            Markup::DecryptionMonitor { .. } => String::new(),
        }
    }
}

impl From<&str> for Markup {
    fn from(text: &str) -> Self {
        Markup::Text(text.to_string())
    }
}

impl From<String> for Markup {
    fn from(text: String) -> Self {
        Markup::Text(text)
    }
}
