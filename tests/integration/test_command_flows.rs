//! Integration Tests for Shell Command Flows
//!
//! These tests verify the emergency shell's command table end to end through
//! a booted session.

use std::sync::Arc;
use std::time::Duration;

use santaterm::script::{
    BIOLOGICAL_SCAN_CONTENT, HELP_TEXT, PASSWORD_PROMPT, README_CONTENT,
};
use santaterm::{
    HistoryLine, InstantClock, LineKind, Markup, Session, SessionConfig, SessionPhase, Tone,
};

const SHELL_PROMPT: &str = "vyshak@santa-server:~$";

async fn ready_session() -> Session {
    let config = SessionConfig {
        seed: Some(11),
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
    session
}

/// Submit a line and return everything it appended
fn run(session: &Session, line: &str) -> Vec<HistoryLine> {
    let before = session.snapshot().lines.len();
    session.submit(line).expect("ready session accepts input");
    session.snapshot().lines.split_off(before)
}

#[tokio::test]
async fn test_echo_carries_prompt() {
    let session = ready_session().await;
    let lines = run(&session, "whoami");

    assert_eq!(lines[0].kind, LineKind::Input);
    assert_eq!(lines[0].prompt.as_deref(), Some(SHELL_PROMPT));
    assert_eq!(lines[0].plain_text(), "whoami");
    assert_eq!(lines[1].kind, LineKind::Output);
    assert_eq!(lines[1].plain_text(), "vyshak");
}

#[tokio::test]
async fn test_help() {
    let session = ready_session().await;
    let lines = run(&session, "help");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].content, Markup::Preformatted(HELP_TEXT.to_string()));
}

#[tokio::test]
async fn test_ls() {
    let session = ready_session().await;
    let lines = run(&session, "ls");
    assert_eq!(
        lines[1].content,
        Markup::Row(vec![
            Markup::styled(Tone::Accent, "README.txt"),
            Markup::styled(Tone::Accent, "biological_scan.log"),
        ])
    );
}

#[tokio::test]
async fn test_cat_files() {
    let session = ready_session().await;

    let readme = run(&session, "cat README.txt");
    assert_eq!(readme[1].plain_text(), README_CONTENT);
    assert_eq!(readme[1].kind, LineKind::Output);

    let scan = run(&session, "cat biological_scan.log");
    assert_eq!(scan[1].plain_text(), BIOLOGICAL_SCAN_CONTENT);

    let missing = run(&session, "cat secrets.txt");
    assert_eq!(missing[1].kind, LineKind::Error);
    assert_eq!(
        missing[1].plain_text(),
        "cat: secrets.txt: No such file or directory"
    );

    let usage = run(&session, "cat");
    assert_eq!(usage[1].kind, LineKind::Error);
    assert_eq!(usage[1].plain_text(), "Usage: cat [filename]");
}

#[tokio::test]
async fn test_file_names_are_case_sensitive() {
    let session = ready_session().await;
    let lines = run(&session, "CAT readme.txt");
    assert_eq!(
        lines[1].plain_text(),
        "cat: readme.txt: No such file or directory"
    );
}

#[tokio::test]
async fn test_sudo() {
    let session = ready_session().await;

    let wrong = run(&session, "sudo rm");
    assert_eq!(
        wrong[1].plain_text(),
        "sudo: rm: command not found. Try: recover_gift"
    );

    let bare = run(&session, "sudo");
    assert_eq!(
        bare[1].plain_text(),
        "sudo: : command not found. Try: recover_gift"
    );
    assert_eq!(session.phase(), SessionPhase::Ready);

    let recover = run(&session, "sudo recover_gift");
    assert_eq!(recover.len(), 1);
    assert_eq!(session.phase(), SessionPhase::PasswordChallenge);
    assert_eq!(session.prompt_label(), PASSWORD_PROMPT);
}

#[tokio::test]
async fn test_unknown_command() {
    let session = ready_session().await;
    let lines = run(&session, "rm -rf /");

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].kind, LineKind::Error);
    assert_eq!(
        lines[1].plain_text(),
        "🚫 ACCESS DENIED: Security clearance insufficient to execute 'rm'.\n\
         > SYSTEM HINT: Type 'help' to view authorized commands."
    );
}

#[tokio::test]
async fn test_command_names_are_case_insensitive() {
    let session = ready_session().await;
    let lines = run(&session, "  WhoAmI  ");
    assert_eq!(lines[0].plain_text(), "  WhoAmI  ");
    assert_eq!(lines[1].plain_text(), "vyshak");
}

#[tokio::test]
async fn test_clear_removes_everything() {
    let session = ready_session().await;
    run(&session, "ls");
    session.submit("clear").expect("clear");

    assert!(session.snapshot().lines.is_empty());
    assert_eq!(session.phase(), SessionPhase::Ready);

    let lines = run(&session, "whoami");
    assert_eq!(session.snapshot().lines.len(), lines.len());
}

#[tokio::test]
async fn test_blank_lines_do_nothing() {
    let session = ready_session().await;
    let before = session.snapshot();
    session.submit("").expect("blank");
    session.submit(" \t ").expect("whitespace");
    assert_eq!(session.snapshot(), before);
}

#[tokio::test]
async fn test_custom_identity() {
    let config = SessionConfig {
        user: "elf".to_string(),
        host: "workshop".to_string(),
        seed: Some(1),
        ..SessionConfig::default()
    };
    let session = Session::with_clock(config, Arc::new(InstantClock::new())).expect("session");
    session.start().expect("start");
    session.wait_for_phase(SessionPhase::Ready).await;

    let lines = run(&session, "whoami");
    assert_eq!(lines[0].prompt.as_deref(), Some("elf@workshop:~$"));
    assert_eq!(lines[1].plain_text(), "elf");
}
