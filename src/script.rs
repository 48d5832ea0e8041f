//! Static terminal scripts
//!
//! Everything the terminal can say that is fixed at build time: the boot
//! log, the self-destruct countdown, decryption flavor text, help text and
//! the two readable files.

use std::time::Duration;

use crate::models::Tone;

/// Prompt shown while waiting for the bio-scan code
pub const PASSWORD_PROMPT: &str = "Enter Bio_Scan Code:";

/// Placeholder echoed instead of a submitted code
pub const MASKED_INPUT: &str = "********";

/// First line of the boot sequence
pub const BOOT_LOADING: &str = "Loading kernel...";
/// Crash banner after the boot log
pub const BOOT_CRASH: &str = "Error! System crashed.";
/// Line announcing the interactive shell
pub const BOOT_EMERGENCY_SHELL: &str = "Dropping to emergency shell.";
/// Greeting shown just before the prompt appears
pub const BOOT_WELCOME: &str = "Identity verified: Vyshak detected. Welcome back, Administrator.";

/// Pause after the loading line
pub const BOOT_LOADING_DELAY: Duration = Duration::from_millis(800);
/// Pause after the last boot log line
pub const BOOT_CRASH_DELAY: Duration = Duration::from_millis(600);
/// Pause after the crash banner
pub const BOOT_SHELL_DELAY: Duration = Duration::from_millis(800);
/// Pause after the emergency shell line
pub const BOOT_WELCOME_DELAY: Duration = Duration::from_millis(500);
/// Pause after the greeting before the prompt
pub const BOOT_READY_DELAY: Duration = Duration::from_millis(300);

/// Lower bound of the per-line boot log delay, in milliseconds
pub const BOOT_LINE_DELAY_MIN_MS: u64 = 50;
/// Upper bound (exclusive) of the per-line boot log delay, in milliseconds
pub const BOOT_LINE_DELAY_MAX_MS: u64 = 200;

/// Boot log played before the crash
pub const BOOT_LOG: [&str; 9] = [
    "Verifying file system integrity... OK",
    "Mounting /dev/sda1 [READ-ONLY]... OK",
    "Loading drivers: HID, STORAGE, NET... OK",
    "Initializing gift_registry_v2.0... FAILED",
    "WARN: Checksum mismatch in sector 9",
    "Trying fallback recovery mode...",
    "ACCESS VIOLATION at address 0x0000FFFF",
    "CRITICAL ERROR: KERNEL PANIC - NOT SYNCING",
    "Dumping physical memory to disk...",
];

/// Severity of a boot log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Classify a boot log line by keyword
    pub fn classify(line: &str) -> Self {
        const ERROR_KEYWORDS: [&str; 4] = ["FAILED", "ERROR", "PANIC", "VIOLATION"];

        if ERROR_KEYWORDS.iter().any(|keyword| line.contains(keyword)) {
            Severity::Error
        } else if line.contains("WARN") {
            Severity::Warning
        } else {
            Severity::Info
        }
    }

    /// Tone used to render a line of this severity
    pub fn tone(self) -> Tone {
        match self {
            Severity::Info => Tone::Muted,
            Severity::Warning => Tone::Warning,
            Severity::Error => Tone::Danger,
        }
    }
}

/// Self-destruct countdown: each message and the pause that follows it
pub const SELF_DESTRUCT: [(&str, Duration); 6] = [
    (
        "CRITICAL ALERT: MAXIMUM FAILED ATTEMPTS EXCEEDED.",
        Duration::from_millis(1000),
    ),
    ("SECURITY PROTOCOL 666 INITIATED.", Duration::from_millis(1000)),
    ("PURGING SYSTEM KERNEL...", Duration::from_millis(1200)),
    ("DELETING GIFT REGISTRY...", Duration::from_millis(1200)),
    ("FORMATTING DRIVE C:...", Duration::from_millis(1500)),
    ("SYSTEM HALTED.", Duration::from_millis(1000)),
];

/// Flavor text scrolled during decryption
pub const DECRYPTION_PHRASES: [&str; 12] = [
    "Bypassing firewall...",
    "Accessing mainframe...",
    "Decrypting sector 7G...",
    "Rerouting power to neural net...",
    "Parsing biological signature...",
    "Injecting shellcode...",
    "Brute-forcing 256-bit key...",
    "Establishing secure handshake...",
    "Downloading payload...",
    "Compiling gift coordinates...",
    "Analyzing spectral emissions...",
    "Overriding security protocols...",
];

/// Pause between the final decryption tick and the reveal
pub const DECRYPTION_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Output of `help`
pub const HELP_TEXT: &str = "Available commands:
  ls                 List directory contents
  cat [filename]     Concatenate and display file content
  whoami             Display current user
  sudo recover_gift  Run the gift recovery protocol
  clear              Clear the terminal screen
  help               Display this help message";

/// Files listed by `ls`, in order
pub const FILES: [&str; 2] = ["README.txt", "biological_scan.log"];

/// Content of README.txt
pub const README_CONTENT: &str =
    "The gift location is corrupted. You need to run the recovery tool.";

/// Content of biological_scan.log
pub const BIOLOGICAL_SCAN_CONTENT: &str = "ENTITY_ID: 8008
Class: Avian
Habitat: Aquatic & Terrestrial
Audio Output: \"Quack\"
Movement Style: Waddle
Special Feature: Hydrophobic feathers
Identify this creature.";

/// Target accepted by `sudo`
pub const RECOVERY_TARGET: &str = "recover_gift";

// Destroyed screen
pub const DESTROYED_HEADLINE: &str = "FATAL ERROR";
pub const DESTROYED_BANNER: &str = "SYSTEM DESTROYED";
pub const DESTROYED_NOTICE: &str = "Please contact your administrator.";
pub const DESTROYED_FOOTER: [&str; 2] = [
    "STOP: 0x0000DEAD (0xBAD, 0xF00D, 0xDEAD, 0xBEEF)",
    "SANTA_OS_CRASH_DUMP_COMPLETE",
];
