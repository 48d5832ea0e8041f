//! Session Phase Model
//!
//! The single mutually-exclusive state of a terminal session and the table
//! of transitions the session controller is allowed to make.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current phase of a terminal session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Boot log is playing; no input accepted
    #[default]
    Booting,
    /// Normal shell prompt
    Ready,
    /// Masked prompt awaiting the bio-scan code
    PasswordChallenge,
    /// Decryption or self-destruct running; no input accepted
    Processing,
    /// Terminal state, nothing happens after this
    Destroyed,
}

impl SessionPhase {
    /// Whether the session may move from `self` to `next`
    pub fn can_transition_to(self, next: SessionPhase) -> bool {
        use SessionPhase::*;
        matches!(
            (self, next),
            (Booting, Ready)
                | (Ready, PasswordChallenge)
                | (PasswordChallenge, Ready)
                | (PasswordChallenge, Processing)
                | (Processing, Ready)
                | (Processing, Destroyed)
        )
    }

    /// Whether raw lines are dispatched in this phase
    pub fn accepts_input(self) -> bool {
        matches!(self, SessionPhase::Ready | SessionPhase::PasswordChallenge)
    }

    /// Whether this phase is final
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionPhase::Destroyed)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Booting => "Booting",
            SessionPhase::Ready => "Ready",
            SessionPhase::PasswordChallenge => "PasswordChallenge",
            SessionPhase::Processing => "Processing",
            SessionPhase::Destroyed => "Destroyed",
        };
        f.write_str(name)
    }
}
