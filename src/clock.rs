//! Timer provider for the session sequencers
//!
//! Every wait in the boot log, the decryption ticks and the self-destruct
//! countdown goes through a [`Clock`], so tests can swap the real tokio timer
//! for an [`InstantClock`] that records the requested delays and returns
//! immediately.

use async_trait::async_trait;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Source of timed waits
#[async_trait]
pub trait Clock: Send + Sync + fmt::Debug {
    /// Suspend the calling task for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Real clock backed by `tokio::time`, optionally sped up
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    /// Divisor applied to every delay
    speed: f64,
}

impl TokioClock {
    /// Real-time clock
    pub fn new() -> Self {
        Self { speed: 1.0 }
    }

    /// Clock running `speed` times faster than real time.
    /// Non-finite or non-positive speeds fall back to real time.
    pub fn with_speed(speed: f64) -> Self {
        if speed.is_finite() && speed > 0.0 {
            Self { speed }
        } else {
            warn!("Ignoring invalid clock speed {}, using 1.0", speed);
            Self::new()
        }
    }

    /// Delay actually slept for a requested duration
    pub fn scaled(&self, duration: Duration) -> Duration {
        duration.div_f64(self.speed)
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(self.scaled(duration)).await;
    }
}

/// Clock that never waits; it records each requested delay and yields
#[derive(Debug, Default)]
pub struct InstantClock {
    requested: Mutex<Vec<Duration>>,
}

impl InstantClock {
    /// Create a new instant clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Every delay requested so far, in order
    pub fn requested(&self) -> Vec<Duration> {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sum of all requested delays
    pub fn total(&self) -> Duration {
        self.requested().into_iter().sum()
    }
}

#[async_trait]
impl Clock for InstantClock {
    async fn sleep(&self, duration: Duration) {
        self.requested
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
        tokio::task::yield_now().await;
    }
}
