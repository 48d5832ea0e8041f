//! Integration Tests for the Bio-Scan Challenge
//!
//! These tests cover the password prompt end to end: the decryption run and
//! reveal after a correct code, the warnings after wrong codes, and the
//! self-destruct once the attempts run out.

use std::sync::Arc;
use std::time::Duration;

use santaterm::models::RunId;
use santaterm::script::{DECRYPTION_SETTLE_DELAY, MASKED_INPUT, SELF_DESTRUCT};
use santaterm::sequence::DecryptionView;
use santaterm::{
    Error, HistoryLine, InstantClock, LineKind, Markup, Session, SessionConfig, SessionPhase,
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn config(threshold: u32) -> SessionConfig {
    SessionConfig {
        seed: Some(2024),
        failure_threshold: threshold,
        ..SessionConfig::default()
    }
}

async fn challenge_session(config: SessionConfig) -> (Session, Arc<InstantClock>) {
    let clock = Arc::new(InstantClock::new());
    let session = Session::with_clock(config, clock.clone()).expect("session");
    session.start().expect("start");
    tokio::time::timeout(TIMEOUT, session.wait_for_phase(SessionPhase::Ready))
        .await
        .expect("boot should finish");
    session.submit("sudo recover_gift").expect("sudo");
    assert_eq!(session.phase(), SessionPhase::PasswordChallenge);
    (session, clock)
}

async fn settle(session: &Session, phase: SessionPhase) -> SessionPhase {
    tokio::time::timeout(TIMEOUT, session.wait_for_phase(phase))
        .await
        .expect("sequence should finish")
}

fn texts(lines: &[HistoryLine]) -> Vec<String> {
    lines.iter().map(HistoryLine::plain_text).collect()
}

fn monitor_runs(lines: &[HistoryLine]) -> Vec<RunId> {
    lines
        .iter()
        .filter_map(|line| match line.content {
            Markup::DecryptionMonitor { run } => Some(run),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_correct_code_reveals_gift() {
    let (session, clock) = challenge_session(config(5)).await;
    let boot_waits = clock.requested().len();

    session.submit("duck").expect("submit");
    assert_eq!(session.phase(), SessionPhase::Processing);
    assert!(!session.accepts_input());

    assert_eq!(settle(&session, SessionPhase::Ready).await, SessionPhase::Ready);

    let snapshot = session.snapshot();
    let monitor = snapshot
        .lines
        .iter()
        .position(|line| matches!(line.content, Markup::DecryptionMonitor { .. }))
        .expect("monitor line");
    assert_eq!(snapshot.lines[monitor - 1].plain_text(), MASKED_INPUT);

    let reveal = snapshot.lines.last().expect("reveal line");
    assert_eq!(reveal.kind, LineKind::Output);
    assert_eq!(
        reveal.plain_text(),
        "Gift location deciphered!\n\
         Navigate to the HR Manager and whisper this access code:  QUACK QUACK QUACK"
    );

    let run = monitor_runs(&snapshot.lines)[0];
    assert_eq!(snapshot.monitor(run), snapshot.decryption.as_ref());

    let view = snapshot.decryption.expect("decryption view");
    assert!(view.is_complete());
    assert_eq!(view.status_label(), "COMPLETE");

    let waits = clock.requested();
    assert_eq!(waits.last(), Some(&DECRYPTION_SETTLE_DELAY));
    assert!(waits[boot_waits..waits.len() - 1]
        .iter()
        .all(|wait| *wait == Duration::from_millis(100)));
}

#[tokio::test]
async fn test_finished_monitor_survives_a_second_run() {
    let (session, _clock) = challenge_session(config(5)).await;
    session.submit("duck").expect("first code");
    settle(&session, SessionPhase::Ready).await;

    session.submit("sudo recover_gift").expect("sudo");
    session.submit("duck").expect("second code");
    assert_eq!(session.phase(), SessionPhase::Processing);

    let snapshot = session.snapshot();
    let runs = monitor_runs(&snapshot.lines);
    assert_eq!(runs.len(), 2);
    assert_ne!(runs[0], runs[1]);
    assert_eq!(snapshot.monitor(runs[0]).map(DecryptionView::percent), Some(100));
    assert_eq!(snapshot.monitor(runs[1]).map(DecryptionView::percent), Some(0));
    assert_eq!(snapshot.decryption.as_ref().map(DecryptionView::percent), Some(0));

    settle(&session, SessionPhase::Ready).await;
    let snapshot = session.snapshot();
    assert!(runs
        .iter()
        .all(|run| snapshot.monitor(*run).is_some_and(DecryptionView::is_complete)));
}

#[tokio::test]
async fn test_code_is_normalized() {
    let (session, _clock) = challenge_session(config(5)).await;
    session.submit("  DuCk \t").expect("submit");
    assert_eq!(session.phase(), SessionPhase::Processing);
    assert_eq!(settle(&session, SessionPhase::Ready).await, SessionPhase::Ready);
}

#[tokio::test]
async fn test_input_rejected_while_processing() {
    let (session, _clock) = challenge_session(config(5)).await;
    session.submit("duck").expect("submit");

    let before = session.snapshot().lines.len();
    assert!(matches!(
        session.submit("help"),
        Err(Error::InputRejected {
            phase: SessionPhase::Processing
        })
    ));
    assert_eq!(session.snapshot().lines.len(), before);
    settle(&session, SessionPhase::Ready).await;
}

#[tokio::test]
async fn test_wrong_code_warns() {
    let (session, _clock) = challenge_session(config(5)).await;
    let before = session.snapshot().lines.len();
    session.submit("goose").expect("submit");

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, SessionPhase::Ready);
    assert_eq!(snapshot.failures, 1);
    assert_eq!(
        texts(&snapshot.lines[before..]),
        vec![
            MASKED_INPUT,
            "Access Denied.",
            "⚠️ WARNING: Self-destruct protocol armed.",
            "4 attempts remaining before system purge.",
        ]
    );
    assert!(snapshot.lines[before + 1..]
        .iter()
        .all(|line| line.kind == LineKind::Error));
}

#[tokio::test]
async fn test_empty_code_counts_as_failure() {
    let (session, _clock) = challenge_session(config(5)).await;
    session.submit("   ").expect("submit");

    let snapshot = session.snapshot();
    assert_eq!(snapshot.failures, 1);
    assert_eq!(snapshot.phase, SessionPhase::Ready);
}

#[tokio::test]
async fn test_success_resets_failures() {
    let (session, _clock) = challenge_session(config(5)).await;
    for _ in 0..3 {
        session.submit("goose").expect("wrong code");
        session.submit("sudo recover_gift").expect("sudo");
    }
    assert_eq!(session.snapshot().failures, 3);

    session.submit("duck").expect("submit");
    assert_eq!(session.snapshot().failures, 0);
    settle(&session, SessionPhase::Ready).await;

    session.submit("sudo recover_gift").expect("sudo");
    session.submit("goose").expect("wrong code");
    let last = session.snapshot().lines.last().map(HistoryLine::plain_text);
    assert_eq!(
        last.as_deref(),
        Some("4 attempts remaining before system purge.")
    );
}

#[tokio::test]
async fn test_five_failures_destroy_the_system() {
    let (session, clock) = challenge_session(config(5)).await;
    for attempt in 1..=4 {
        session.submit("goose").expect("wrong code");
        assert_eq!(session.snapshot().failures, attempt);
        session.submit("sudo recover_gift").expect("sudo");
    }

    let before = session.snapshot().lines.len();
    let waits_before = clock.requested().len();
    session.submit("goose").expect("final wrong code");
    assert_eq!(session.phase(), SessionPhase::Processing);

    assert_eq!(
        settle(&session, SessionPhase::Destroyed).await,
        SessionPhase::Destroyed
    );

    let snapshot = session.snapshot();
    let mut expected = vec![MASKED_INPUT.to_string(), "Access Denied.".to_string()];
    expected.extend(SELF_DESTRUCT.iter().map(|(message, _)| message.to_string()));
    assert_eq!(texts(&snapshot.lines[before..]), expected);

    let pauses: Vec<Duration> = SELF_DESTRUCT.iter().map(|(_, pause)| *pause).collect();
    assert_eq!(&clock.requested()[waits_before..], &pauses[..]);
}

#[tokio::test]
async fn test_destroyed_is_terminal() {
    let (session, _clock) = challenge_session(config(1)).await;
    session.submit("goose").expect("wrong code");
    settle(&session, SessionPhase::Destroyed).await;

    let before = session.snapshot();
    assert!(!session.accepts_input());
    assert!(matches!(
        session.submit("help"),
        Err(Error::InputRejected {
            phase: SessionPhase::Destroyed
        })
    ));
    assert_eq!(session.snapshot(), before);
}

#[tokio::test]
async fn test_configurable_threshold() {
    let (session, _clock) = challenge_session(config(2)).await;
    session.submit("goose").expect("wrong code");
    assert_eq!(
        session.snapshot().lines.last().map(HistoryLine::plain_text),
        Some("1 attempts remaining before system purge.".to_string())
    );

    session.submit("sudo recover_gift").expect("sudo");
    session.submit("swan").expect("wrong code");
    assert_eq!(
        settle(&session, SessionPhase::Destroyed).await,
        SessionPhase::Destroyed
    );
}

#[tokio::test]
async fn test_dropping_session_aborts_decryption() {
    let (session, clock) = challenge_session(config(5)).await;
    session.submit("duck").expect("submit");
    let waits = clock.requested().len();
    drop(session);

    for _ in 0..50 {
        tokio::task::yield_now().await;
    }
    assert_eq!(clock.requested().len(), waits);
}
