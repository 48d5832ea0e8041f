//! Session controller
//!
//! [`Session`] owns the phase, the transcript, the failure counter and the
//! random source. Input from the renderer and steps from the timed
//! sequencers are each applied as one locked step on the shared state, and
//! every step publishes its events after the mutation is complete.
//!
//! The sequencers run as tokio tasks on the runtime that was current when the
//! session was created. They hold only a weak reference to the shared state,
//! so dropping the [`Session`] ends them at their next step.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::clock::{Clock, TokioClock};
use crate::commands::{CommandInterpreter, Effect, Submission};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::{self, SessionEvent};
use crate::history::HistoryLog;
use crate::models::failure::DEFAULT_FAILURE_THRESHOLD;
use crate::models::{
    FailureCounter, FailureVerdict, HistoryLine, LineId, LineKind, Markup, RunId, SessionPhase,
};
use crate::payload::Reveal;
use crate::script::{BOOT_LINE_DELAY_MAX_MS, BOOT_LINE_DELAY_MIN_MS};
use crate::sequence::decryption::DEFAULT_TICK_INTERVAL;
use crate::sequence::{self, DecryptionAnimator, DecryptionView, Tick};

/// Settings a session is built from
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// User name for the prompt and `whoami`
    pub user: String,
    /// Host name for the prompt
    pub host: String,
    /// Wrong codes allowed before the self-destruct
    pub failure_threshold: u32,
    /// Fixed random seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Interval between decryption ticks
    pub decryption_tick: Duration,
    /// Playback speed of the default clock
    pub speed: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user: "vyshak".to_string(),
            host: "santa-server".to_string(),
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            seed: None,
            decryption_tick: DEFAULT_TICK_INTERVAL,
            speed: 1.0,
        }
    }
}

impl From<&Config> for SessionConfig {
    fn from(config: &Config) -> Self {
        Self {
            user: config.session.user.clone(),
            host: config.session.host.clone(),
            failure_threshold: config.session.failure_threshold,
            seed: config.session.seed,
            decryption_tick: config.timing.decryption_tick(),
            speed: config.timing.speed,
        }
    }
}

/// Point-in-time copy of everything the renderer draws
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub lines: Vec<HistoryLine>,
    /// Most recent decryption run
    pub decryption: Option<DecryptionView>,
    /// Every run whose monitor line may still be on screen
    pub monitors: HashMap<RunId, DecryptionView>,
    pub failures: u32,
    pub prompt: String,
    pub masked: bool,
}

impl SessionSnapshot {
    /// View drawn by the monitor line of `run`
    pub fn monitor(&self, run: RunId) -> Option<&DecryptionView> {
        self.monitors.get(&run)
    }
}

/// Mutable session state, only touched under the lock
struct SessionState {
    phase: SessionPhase,
    history: HistoryLog,
    failures: FailureCounter,
    rng: StdRng,
    /// Animators by run; finished runs keep their final state
    decryptions: HashMap<RunId, DecryptionAnimator>,
    /// Run started by the latest accepted code
    current_run: Option<RunId>,
    decryption_task: Option<JoinHandle<()>>,
    boot_started: bool,
    /// Events produced by the current step, published when it ends
    pending: Vec<SessionEvent>,
}

impl SessionState {
    fn transition(&mut self, to: SessionPhase) -> Result<()> {
        let from = self.phase;
        if !from.can_transition_to(to) {
            warn!("Rejected phase transition {} -> {}", from, to);
            return Err(Error::InvalidTransition { from, to });
        }

        info!("Session phase {} -> {}", from, to);
        self.phase = to;
        self.pending.push(SessionEvent::PhaseChanged { from, to });
        Ok(())
    }

    fn append(&mut self, kind: LineKind, content: impl Into<Markup>) -> LineId {
        let id = self.history.append(kind, content);
        self.pending.push(SessionEvent::LineAppended { id });
        id
    }

    fn push(&mut self, line: HistoryLine) -> LineId {
        let id = self.history.push(line);
        self.pending.push(SessionEvent::LineAppended { id });
        id
    }

    fn clear_history(&mut self) {
        self.history.clear();
        let current = self.current_run;
        self.decryptions.retain(|run, _| Some(*run) == current);
        self.pending.push(SessionEvent::HistoryCleared);
    }
}

/// State shared between the session handle and its sequencer tasks
pub(crate) struct Shared {
    me: Weak<Shared>,
    state: Mutex<SessionState>,
    events: broadcast::Sender<SessionEvent>,
    phase_tx: watch::Sender<SessionPhase>,
    clock: Arc<dyn Clock>,
    runtime: Handle,
    interpreter: CommandInterpreter,
    tick: Duration,
}

impl Shared {
    /// Run one locked step and publish what it produced
    fn with_state<R>(&self, step: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let result = step(&mut state);

        let phase = state.phase;
        for event in state.pending.drain(..) {
            // No receivers is fine
            let _ = self.events.send(event);
        }
        self.phase_tx.send_if_modified(|current| {
            if *current == phase {
                false
            } else {
                *current = phase;
                true
            }
        });

        result
    }

    /// Append a line to the transcript
    pub(crate) fn append(&self, kind: LineKind, content: Markup) -> LineId {
        self.with_state(|state| state.append(kind, content))
    }

    /// Random pause after one boot log line
    pub(crate) fn boot_line_delay(&self) -> Duration {
        self.with_state(|state| {
            Duration::from_millis(
                state
                    .rng
                    .gen_range(BOOT_LINE_DELAY_MIN_MS..BOOT_LINE_DELAY_MAX_MS),
            )
        })
    }

    pub(crate) fn finish_boot(&self) {
        self.with_state(|state| {
            if state.transition(SessionPhase::Ready).is_ok() {
                info!("Boot sequence finished");
                state.pending.push(SessionEvent::FocusRequested);
            }
        });
    }

    /// Advance the running decryption by one tick
    pub(crate) fn decryption_tick(&self) -> Tick {
        self.with_state(|state| {
            let Some(animator) = state
                .current_run
                .and_then(|run| state.decryptions.get_mut(&run))
            else {
                return Tick::Idle;
            };
            let tick = animator.tick(&mut state.rng);
            if let Tick::Advanced { .. } = tick {
                let percent = animator.view().percent();
                debug!("Decryption at {}%", percent);
                state
                    .pending
                    .push(SessionEvent::DecryptionProgress { percent });
            }
            tick
        })
    }

    pub(crate) fn finish_decryption(&self) {
        self.with_state(|state| {
            state.decryption_task = None;
            if state.transition(SessionPhase::Ready).is_err() {
                return;
            }
            info!("Decryption complete, revealing payload");
            state.append(LineKind::Output, Reveal::decode().to_markup());
            state.pending.push(SessionEvent::FocusRequested);
        });
    }

    pub(crate) fn finish_self_destruct(&self) {
        self.with_state(|state| {
            if state.transition(SessionPhase::Destroyed).is_ok() {
                warn!("Self-destruct complete, session destroyed");
            }
        });
    }

    fn start(&self) -> Result<()> {
        self.with_state(|state| {
            if state.boot_started {
                return Err(Error::AlreadyStarted);
            }
            state.boot_started = true;
            self.runtime
                .spawn(sequence::boot::run(self.me.clone(), self.clock.clone()));
            Ok(())
        })
    }

    fn submit(&self, raw: &str) -> Result<()> {
        self.with_state(|state| match self.interpreter.interpret(state.phase, raw) {
            Submission::Rejected => {
                debug!("Input rejected while {}", state.phase);
                Err(Error::InputRejected { phase: state.phase })
            }
            Submission::Ignored => Ok(()),
            Submission::Command { echo, command } => {
                debug!("Dispatching {:?}", command);
                state.push(echo);
                self.apply(state, self.interpreter.execute(&command))
            }
            Submission::Password { echo, accepted } => {
                state.push(echo);
                if accepted {
                    self.begin_decryption(state)
                } else {
                    self.reject_password(state)
                }
            }
        })
    }

    fn apply(&self, state: &mut SessionState, effect: Effect) -> Result<()> {
        match effect {
            Effect::Output(content) => {
                state.append(LineKind::Output, content);
            }
            Effect::Error(content) => {
                state.append(LineKind::Error, content);
            }
            Effect::ClearHistory => state.clear_history(),
            Effect::EnterPasswordChallenge => state.transition(SessionPhase::PasswordChallenge)?,
        }
        Ok(())
    }

    fn begin_decryption(&self, state: &mut SessionState) -> Result<()> {
        state.transition(SessionPhase::Processing)?;
        info!("Bio-scan accepted");
        state.failures.reset();
        let run = RunId::new();
        debug!("Starting decryption run {}", run);
        state.decryptions.insert(run, DecryptionAnimator::new());
        state.current_run = Some(run);
        state.append(LineKind::Output, Markup::DecryptionMonitor { run });

        let task = self.runtime.spawn(sequence::decryption::run(
            self.me.clone(),
            self.clock.clone(),
            self.tick,
        ));
        if let Some(previous) = state.decryption_task.replace(task) {
            previous.abort();
        }
        Ok(())
    }

    fn reject_password(&self, state: &mut SessionState) -> Result<()> {
        state.append(LineKind::Error, "Access Denied.");

        match state.failures.record_failure() {
            FailureVerdict::Exhausted => {
                state.transition(SessionPhase::Processing)?;
                self.runtime.spawn(sequence::self_destruct::run(
                    self.me.clone(),
                    self.clock.clone(),
                ));
            }
            FailureVerdict::Remaining(remaining) => {
                info!("Bio-scan rejected, {} attempts remaining", remaining);
                state.append(LineKind::Error, "⚠️ WARNING: Self-destruct protocol armed.");
                state.append(
                    LineKind::Error,
                    format!("{} attempts remaining before system purge.", remaining),
                );
                state.transition(SessionPhase::Ready)?;
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> SessionSnapshot {
        self.with_state(|state| SessionSnapshot {
            phase: state.phase,
            lines: state.history.snapshot(),
            decryption: state
                .current_run
                .and_then(|run| state.decryptions.get(&run))
                .map(DecryptionAnimator::view),
            monitors: state
                .decryptions
                .iter()
                .map(|(run, animator)| (*run, animator.view()))
                .collect(),
            failures: state.failures.count(),
            prompt: self.interpreter.prompt_for(state.phase),
            masked: state.phase == SessionPhase::PasswordChallenge,
        })
    }
}

/// A simulated crashed terminal
pub struct Session {
    shared: Arc<Shared>,
}

impl Session {
    /// Create a session on the current tokio runtime with a real-time clock
    pub fn new(config: SessionConfig) -> Result<Self> {
        let clock = Arc::new(TokioClock::with_speed(config.speed));
        Self::with_clock(config, clock)
    }

    /// Create a session driven by the given clock
    pub fn with_clock(config: SessionConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| Error::RuntimeUnavailable {
            reason: e.to_string(),
        })?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (phase_tx, _phase_rx) = watch::channel(SessionPhase::Booting);

        let shared = Arc::new_cyclic(|me| Shared {
            me: me.clone(),
            state: Mutex::new(SessionState {
                phase: SessionPhase::Booting,
                history: HistoryLog::new(),
                failures: FailureCounter::new(config.failure_threshold),
                rng,
                decryptions: HashMap::new(),
                current_run: None,
                decryption_task: None,
                boot_started: false,
                pending: Vec::new(),
            }),
            events: events::channel(),
            phase_tx,
            clock,
            runtime,
            interpreter: CommandInterpreter::new(config.user, config.host),
            tick: config.decryption_tick,
        });

        debug!("Session created");
        Ok(Self { shared })
    }

    /// Launch the boot sequence; only once per session
    pub fn start(&self) -> Result<()> {
        self.shared.start()
    }

    /// Submit one line of input
    pub fn submit(&self, raw: &str) -> Result<()> {
        self.shared.submit(raw)
    }

    /// Current phase
    pub fn phase(&self) -> SessionPhase {
        *self.shared.phase_tx.borrow()
    }

    /// Copy of the state the renderer needs
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.snapshot()
    }

    /// Receive future session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.shared.events.subscribe()
    }

    /// Watch the phase
    pub fn phase_receiver(&self) -> watch::Receiver<SessionPhase> {
        self.shared.phase_tx.subscribe()
    }

    /// Wait until the session reaches `phase`, or the terminal phase.
    /// Returns the phase that ended the wait.
    pub async fn wait_for_phase(&self, phase: SessionPhase) -> SessionPhase {
        let mut rx = self.phase_receiver();
        let reached = rx
            .wait_for(|current| *current == phase || current.is_terminal())
            .await
            .map(|current| *current);
        reached.unwrap_or_else(|_| self.phase())
    }

    /// Label shown before the input field
    pub fn prompt_label(&self) -> String {
        self.shared.interpreter.prompt_for(self.phase())
    }

    /// Whether the input row should be shown
    pub fn accepts_input(&self) -> bool {
        self.phase().accepts_input()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(task) = self.shared.with_state(|state| state.decryption_task.take()) {
            debug!("Aborting decryption task");
            task.abort();
        }
    }
}
