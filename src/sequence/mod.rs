//! Timed sequencers
//!
//! Each sequencer is a one-shot, strictly ordered script of transcript
//! appends separated by clock waits, ending in a phase change requested from
//! the session. Sequencers only hold a weak reference to the session: once
//! the session is dropped, the next step finds nothing to upgrade and the
//! task ends without touching freed state.

pub mod boot;
pub mod decryption;
pub mod self_destruct;

use std::sync::Weak;

use crate::session::Shared;

pub use decryption::{DecryptionAnimator, DecryptionView, Tick};

/// Run one step against a live session; `None` once it has been dropped
pub(crate) fn with_live<R>(session: &Weak<Shared>, step: impl FnOnce(&Shared) -> R) -> Option<R> {
    let shared = session.upgrade()?;
    Some(step(&shared))
}
