//! Command parsing and dispatch
//!
//! This module turns one submitted line into either a bio-scan attempt or a
//! shell command, and maps each shell command onto the effect it has on the
//! session. It never touches session state itself; the session applies the
//! returned [`Submission`] and [`Effect`].

use zeroize::Zeroizing;

use crate::integrity;
use crate::models::{HistoryLine, Markup, SessionPhase, Tone};
use crate::script::{
    BIOLOGICAL_SCAN_CONTENT, FILES, HELP_TEXT, MASKED_INPUT, PASSWORD_PROMPT, README_CONTENT,
    RECOVERY_TARGET,
};

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    Ls,
    Whoami,
    Cat { file: Option<String> },
    Sudo { target: Option<String> },
    Unknown { name: String },
}

impl Command {
    /// Parse a line; `None` for blank input.
    /// The command name is case-insensitive, arguments are not.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?.to_lowercase();
        let argument = tokens.next().map(str::to_string);

        let command = match name.as_str() {
            "help" => Command::Help,
            "clear" => Command::Clear,
            "ls" => Command::Ls,
            "whoami" => Command::Whoami,
            "cat" => Command::Cat { file: argument },
            "sudo" => Command::Sudo { target: argument },
            _ => Command::Unknown { name },
        };
        Some(command)
    }
}

/// What a command does to the session
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append an Output line
    Output(Markup),
    /// Append an Error line
    Error(Markup),
    /// Empty the transcript
    ClearHistory,
    /// Switch to the masked bio-scan prompt
    EnterPasswordChallenge,
}

/// How the session should handle a submitted line
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The current phase does not take input
    Rejected,
    /// Blank line at the shell prompt
    Ignored,
    /// A shell command with its echo
    Command { echo: HistoryLine, command: Command },
    /// A bio-scan attempt with its masked echo
    Password { echo: HistoryLine, accepted: bool },
}

/// Interprets submitted lines for one terminal user
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    user: String,
    host: String,
}

impl CommandInterpreter {
    /// Create an interpreter for `user` on `host`
    pub fn new(user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
        }
    }

    /// Shell prompt label
    pub fn prompt(&self) -> String {
        format!("{}@{}:~$", self.user, self.host)
    }

    /// Prompt label for the given phase
    pub fn prompt_for(&self, phase: SessionPhase) -> String {
        match phase {
            SessionPhase::PasswordChallenge => PASSWORD_PROMPT.to_string(),
            _ => self.prompt(),
        }
    }

    /// Decide what a submitted line means in `phase`
    pub fn interpret(&self, phase: SessionPhase, raw: &str) -> Submission {
        match phase {
            SessionPhase::PasswordChallenge => {
                let candidate = Zeroizing::new(integrity::normalize(raw));
                let accepted = integrity::verify(&candidate);
                Submission::Password {
                    echo: HistoryLine::input(PASSWORD_PROMPT, MASKED_INPUT),
                    accepted,
                }
            }
            SessionPhase::Ready => match Command::parse(raw) {
                Some(command) => Submission::Command {
                    echo: HistoryLine::input(self.prompt(), raw),
                    command,
                },
                None => Submission::Ignored,
            },
            SessionPhase::Booting | SessionPhase::Processing | SessionPhase::Destroyed => {
                Submission::Rejected
            }
        }
    }

    /// Run a shell command
    pub fn execute(&self, command: &Command) -> Effect {
        match command {
            Command::Help => Effect::Output(Markup::Preformatted(HELP_TEXT.to_string())),
            Command::Clear => Effect::ClearHistory,
            Command::Ls => Effect::Output(Markup::Row(
                FILES
                    .iter()
                    .map(|file| Markup::styled(Tone::Accent, *file))
                    .collect(),
            )),
            Command::Whoami => Effect::Output(Markup::text(self.user.clone())),
            Command::Cat { file: None } => Effect::Error(Markup::text("Usage: cat [filename]")),
            Command::Cat { file: Some(file) } => match file.as_str() {
                "README.txt" => Effect::Output(Markup::text(README_CONTENT)),
                "biological_scan.log" => {
                    Effect::Output(Markup::Preformatted(BIOLOGICAL_SCAN_CONTENT.to_string()))
                }
                other => Effect::Error(Markup::text(format!(
                    "cat: {}: No such file or directory",
                    other
                ))),
            },
            Command::Sudo { target } if target.as_deref() == Some(RECOVERY_TARGET) => {
                Effect::EnterPasswordChallenge
            }
            Command::Sudo { target } => Effect::Error(Markup::text(format!(
                "sudo: {}: command not found. Try: {}",
                target.as_deref().unwrap_or(""),
                RECOVERY_TARGET
            ))),
            Command::Unknown { name } => Effect::Error(Markup::Column(vec![
                Markup::text(format!(
                    "🚫 ACCESS DENIED: Security clearance insufficient to execute '{}'.",
                    name
                )),
                Markup::styled(
                    Tone::Hint,
                    "> SYSTEM HINT: Type 'help' to view authorized commands.",
                ),
            ])),
        }
    }
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new("vyshak", "santa-server")
    }
}
