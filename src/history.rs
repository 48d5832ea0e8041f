//! Terminal transcript management
//!
//! The history log is the single source of truth for what the terminal has
//! shown. Lines are only ever appended; the `clear` command is the one
//! operation that removes anything, and it removes everything.

use crate::models::{HistoryLine, LineId, LineKind, Markup};

/// Append-only transcript of displayed lines
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    /// Lines in display order
    lines: Vec<HistoryLine>,
}

impl HistoryLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line of the given kind and return its fresh id
    pub fn append(&mut self, kind: LineKind, content: impl Into<Markup>) -> LineId {
        self.push(HistoryLine::new(kind, content.into()))
    }

    /// Append a prepared line
    pub fn push(&mut self, line: HistoryLine) -> LineId {
        let id = line.id;
        self.lines.push(line);
        id
    }

    /// Drop every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Owned copy of the transcript for rendering
    pub fn snapshot(&self) -> Vec<HistoryLine> {
        self.lines.clone()
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the transcript is empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
