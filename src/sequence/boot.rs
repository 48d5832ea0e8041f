//! Boot sequence
//!
//! Plays the kernel loading log, crashes, drops to the emergency shell and
//! greets the administrator, then asks the session to become `Ready`.

use std::sync::{Arc, Weak};
use std::time::Duration;

use super::with_live;
use crate::clock::Clock;
use crate::models::{LineKind, Markup, Tone};
use crate::script::{
    Severity, BOOT_CRASH, BOOT_CRASH_DELAY, BOOT_EMERGENCY_SHELL, BOOT_LOADING,
    BOOT_LOADING_DELAY, BOOT_LOG, BOOT_READY_DELAY, BOOT_SHELL_DELAY, BOOT_WELCOME,
    BOOT_WELCOME_DELAY,
};
use crate::session::Shared;

/// Wait after a boot line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// Fixed delay
    Fixed(Duration),
    /// Random delay drawn from the session's random source, plus `extra`
    Jitter { extra: Duration },
}

/// One line of the boot script and the pause that follows it
#[derive(Debug, Clone, PartialEq)]
pub struct BootStep {
    pub kind: LineKind,
    pub content: Markup,
    pub pause: Pause,
}

impl BootStep {
    fn new(kind: LineKind, content: Markup, pause: Pause) -> Self {
        Self {
            kind,
            content,
            pause,
        }
    }
}

/// The full boot script, in order
pub fn script() -> Vec<BootStep> {
    let mut steps = Vec::with_capacity(BOOT_LOG.len() + 4);

    steps.push(BootStep::new(
        LineKind::System,
        Markup::text(BOOT_LOADING),
        Pause::Fixed(BOOT_LOADING_DELAY),
    ));

    let last = BOOT_LOG.len() - 1;
    for (index, line) in BOOT_LOG.iter().enumerate() {
        let tone = Severity::classify(line).tone();
        let extra = if index == last {
            BOOT_CRASH_DELAY
        } else {
            Duration::ZERO
        };
        steps.push(BootStep::new(
            LineKind::System,
            Markup::styled(tone, *line),
            Pause::Jitter { extra },
        ));
    }

    steps.push(BootStep::new(
        LineKind::Error,
        Markup::text(BOOT_CRASH),
        Pause::Fixed(BOOT_SHELL_DELAY),
    ));

    steps.push(BootStep::new(
        LineKind::System,
        Markup::text(BOOT_EMERGENCY_SHELL),
        Pause::Fixed(BOOT_WELCOME_DELAY),
    ));
    steps.push(BootStep::new(
        LineKind::System,
        Markup::styled(Tone::Accent, BOOT_WELCOME),
        Pause::Fixed(BOOT_READY_DELAY),
    ));

    steps
}

/// Play the boot script against the session
pub(crate) async fn run(session: Weak<Shared>, clock: Arc<dyn Clock>) {
    info!("Boot sequence started");

    for step in script() {
        let pause = with_live(&session, |shared| {
            shared.append(step.kind, step.content);
            match step.pause {
                Pause::Fixed(delay) => delay,
                Pause::Jitter { extra } => shared.boot_line_delay() + extra,
            }
        });
        let Some(pause) = pause else {
            debug!("Session dropped during boot");
            return;
        };
        clock.sleep(pause).await;
    }

    with_live(&session, Shared::finish_boot);
}
