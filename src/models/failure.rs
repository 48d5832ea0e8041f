//! Failed Attempt Counter
//!
//! Counts wrong bio-scan codes for the lifetime of a session. It only goes
//! back to zero on a successful attempt.

use serde::{Deserialize, Serialize};

/// Default number of wrong codes before the self-destruct fires
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 5;

/// Outcome of recording a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureVerdict {
    /// Attempts left before the threshold
    Remaining(u32),
    /// Threshold reached
    Exhausted,
}

/// Failed password attempt counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureCounter {
    count: u32,
    threshold: u32,
}

impl FailureCounter {
    /// Create a counter; a zero threshold is raised to one
    pub fn new(threshold: u32) -> Self {
        Self {
            count: 0,
            threshold: threshold.max(1),
        }
    }

    /// Record a wrong attempt
    pub fn record_failure(&mut self) -> FailureVerdict {
        self.count = self.count.saturating_add(1);
        if self.count >= self.threshold {
            FailureVerdict::Exhausted
        } else {
            FailureVerdict::Remaining(self.threshold - self.count)
        }
    }

    /// Reset after a successful attempt
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Current number of consecutive failures
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Default for FailureCounter {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_THRESHOLD)
    }
}
