//! Security Tests: Bio-Scan Code Isolation
//!
//! These tests verify that codes typed at the bio-scan prompt never reach the
//! transcript, the session snapshot or the event stream, and that the reward
//! only appears after a successful scan.

use std::sync::Arc;
use std::time::Duration;

use santaterm::{
    InstantClock, LineKind, Session, SessionConfig, SessionEvent, SessionPhase,
};

const SECRET_ATTEMPT: &str = "hunter2-correct-horse";

async fn challenge_session() -> Session {
    let config = SessionConfig {
        seed: Some(99),
        ..SessionConfig::default()
    };
    let session = Session::with_clock(config, Arc::new(InstantClock::new())).expect("session");
    session.start().expect("start");
    tokio::time::timeout(
        Duration::from_secs(5),
        session.wait_for_phase(SessionPhase::Ready),
    )
    .await
    .expect("boot should finish");
    session.submit("sudo recover_gift").expect("sudo");
    session
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_wrong_code_not_in_history() {
    let session = challenge_session().await;
    let mut events = session.subscribe();
    session.submit(SECRET_ATTEMPT).expect("submit");

    let snapshot = session.snapshot();
    assert!(snapshot
        .lines
        .iter()
        .all(|line| !line.plain_text().contains("hunter2")));
    assert!(!format!("{:?}", snapshot).contains("hunter2"));
    assert!(!format!("{:?}", drain(&mut events)).contains("hunter2"));
}

#[tokio::test]
async fn test_correct_code_not_in_history() {
    let session = challenge_session().await;
    session.submit("duck").expect("submit");
    tokio::time::timeout(
        Duration::from_secs(5),
        session.wait_for_phase(SessionPhase::Ready),
    )
    .await
    .expect("decryption should finish");

    let snapshot = session.snapshot();
    let echoes: Vec<_> = snapshot
        .lines
        .iter()
        .filter(|line| line.kind == LineKind::Input)
        .map(|line| line.plain_text())
        .collect();
    assert_eq!(echoes.last().map(String::as_str), Some("********"));
    assert!(snapshot
        .lines
        .iter()
        .all(|line| !line.plain_text().to_lowercase().contains("duck")));
}

#[tokio::test]
async fn test_echo_is_fixed_width() {
    let session = challenge_session().await;
    session.submit("x").expect("submit");
    session.submit("sudo recover_gift").expect("sudo");
    session.submit("a much longer wrong guess").expect("submit");

    let masks: Vec<_> = session
        .snapshot()
        .lines
        .iter()
        .filter(|line| line.prompt.as_deref() == Some("Enter Bio_Scan Code:"))
        .map(|line| line.plain_text())
        .collect();
    assert_eq!(masks, vec!["********", "********"]);
}

#[tokio::test]
async fn test_reward_hidden_until_success() {
    let session = challenge_session().await;
    session.submit("goose").expect("submit");

    let before = format!("{:?}", session.snapshot());
    assert!(!before.contains("QUACK"));
    assert!(!before.contains("HR Manager"));
}

#[tokio::test]
async fn test_snapshot_reports_masking() {
    let session = challenge_session().await;
    assert!(session.snapshot().masked);

    session.submit("goose").expect("submit");
    assert!(!session.snapshot().masked);
}
