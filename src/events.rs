//! Session notifications
//!
//! The session broadcasts a [`SessionEvent`] after every state change so a
//! renderer can scroll to the newest line, move focus, or repaint the
//! decryption monitor without polling for differences.

use tokio::sync::broadcast;

use crate::models::{LineId, SessionPhase};

/// Capacity of the event channel; slow receivers skip ahead
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Something changed inside a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A line was appended to the transcript
    LineAppended { id: LineId },
    /// The transcript was cleared
    HistoryCleared,
    /// The phase changed
    PhaseChanged {
        from: SessionPhase,
        to: SessionPhase,
    },
    /// Decryption progress moved
    DecryptionProgress { percent: u8 },
    /// The renderer should focus its input field
    FocusRequested,
}

impl SessionEvent {
    /// Whether the renderer should scroll to the newest line
    pub fn scrolls_history(&self) -> bool {
        matches!(
            self,
            SessionEvent::LineAppended { .. }
                | SessionEvent::HistoryCleared
                | SessionEvent::DecryptionProgress { .. }
        )
    }
}

/// Create the broadcast channel used by a session
pub fn channel() -> broadcast::Sender<SessionEvent> {
    let (tx, _rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
    tx
}
