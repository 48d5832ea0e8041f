//! Decryption animation
//!
//! A randomized progress meter that creeps from 0 to 100% while a short
//! rolling log of hacker phrases scrolls past. The animator itself is a
//! plain state machine driven by [`DecryptionAnimator::tick`]; [`run`] drives
//! it on the session clock and hands control back to the session exactly
//! once when it finishes.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use std::time::Duration;

use super::with_live;
use crate::clock::Clock;
use crate::script::{DECRYPTION_PHRASES, DECRYPTION_SETTLE_DELAY};
use crate::session::Shared;

/// Number of phrases kept in the rolling log
pub const LOG_CAPACITY: usize = 5;

/// Width of the rendered progress bar
pub const PROGRESS_BAR_WIDTH: usize = 30;

/// Default interval between ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

const MIN_STEP: f64 = 1.0;
const MAX_STEP: f64 = 4.0;
const PHRASE_PROBABILITY: f64 = 0.5;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Progress moved to `progress`
    Advanced { progress: f64 },
    /// Progress was already full; reported once
    Finished,
    /// Nothing left to do
    Idle,
}

/// Progress state of one decryption run
#[derive(Debug, Clone, Default)]
pub struct DecryptionAnimator {
    progress: f64,
    log: VecDeque<String>,
    finished: bool,
}

impl DecryptionAnimator {
    /// Start at 0% with an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Tick {
        if self.progress >= 100.0 {
            if self.finished {
                return Tick::Idle;
            }
            self.finished = true;
            return Tick::Finished;
        }

        let step = rng.gen_range(MIN_STEP..MAX_STEP);
        self.progress = (self.progress + step).min(100.0);

        if rng.gen_bool(PHRASE_PROBABILITY) {
            if let Some(phrase) = DECRYPTION_PHRASES.choose(rng) {
                self.push_log(format!("> {}", phrase));
            }
        }

        Tick::Advanced {
            progress: self.progress,
        }
    }

    fn push_log(&mut self, entry: String) {
        self.log.push_back(entry);
        while self.log.len() > LOG_CAPACITY {
            self.log.pop_front();
        }
    }

    /// Snapshot for rendering
    pub fn view(&self) -> DecryptionView {
        DecryptionView {
            progress: self.progress,
            log: self.log.iter().cloned().collect(),
        }
    }
}

/// Read-only decryption state for the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct DecryptionView {
    pub progress: f64,
    pub log: Vec<String>,
}

impl DecryptionView {
    /// Whole percent, rounded down
    pub fn percent(&self) -> u8 {
        self.progress.clamp(0.0, 100.0).floor() as u8
    }

    /// `[====------] NN%` bar of `width` cells
    pub fn progress_bar(&self, width: usize) -> String {
        let filled = ((self.progress.clamp(0.0, 100.0) / 100.0) * width as f64).floor() as usize;
        let filled = filled.min(width);
        format!(
            "[{}{}] {}%",
            "=".repeat(filled),
            "-".repeat(width - filled),
            self.percent()
        )
    }

    /// Whether progress has reached 100%
    pub fn is_complete(&self) -> bool {
        self.progress >= 100.0
    }

    /// Status line under the bar
    pub fn status_label(&self) -> &'static str {
        if self.is_complete() {
            "COMPLETE"
        } else {
            "PROCESSING..."
        }
    }
}

/// Drive the session's animator until it finishes, then reveal
pub(crate) async fn run(session: Weak<Shared>, clock: Arc<dyn Clock>, interval: Duration) {
    debug!("Decryption animation started");
    loop {
        clock.sleep(interval).await;
        match with_live(&session, Shared::decryption_tick) {
            Some(Tick::Advanced { .. }) => continue,
            Some(Tick::Finished) => break,
            Some(Tick::Idle) | None => return,
        }
    }

    clock.sleep(DECRYPTION_SETTLE_DELAY).await;
    with_live(&session, Shared::finish_decryption);
}
