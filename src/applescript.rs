//! Message delivery through Messages.app.
//!
//! Uses osascript to drive Messages. The recipient and text are handed to
//! the script as `argv`, never spliced into the script source, so quotes
//! and backslashes in names or messages cannot alter the script.
//!
//! CHANGELOG:
//! - 10/18/2026 - Sender trait, dry-run sender, argv parameter passing
//! - 10/18/2026 - Initial implementation

use std::process::Command;
use thiserror::Error;

/// Interpreter used to run the send script.
pub const OSASCRIPT: &str = "osascript";

/// Opens (or creates) an iMessage chat with `item 1 of argv` and sends
/// `item 2 of argv` to it.
pub const SEND_SCRIPT: &str = r#"on run argv
    set targetBuddy to item 1 of argv
    set messageText to item 2 of argv
    tell application "Messages"
        set targetService to 1st service whose service type is iMessage
        set targetChat to make new chat with properties {service:targetService, participants:{targetBuddy}}
        send messageText to targetChat
    end tell
end run"#;

#[derive(Error, Debug)]
pub enum SendError {
    #[error("Failed to run osascript: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("AppleScript failed: {0}")]
    ScriptFailed(String),
}

/// Delivers one message to one address.
pub trait Sender {
    fn send(&self, address: &str, message: &str) -> Result<(), SendError>;

    /// True when `send` does not actually deliver anything.
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Sends through Messages.app via osascript. Blocks until osascript exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppleScriptSender;

impl AppleScriptSender {
    /// Full osascript argument list for one send.
    pub fn args<'a>(address: &'a str, message: &'a str) -> [&'a str; 4] {
        ["-e", SEND_SCRIPT, address, message]
    }
}

impl Sender for AppleScriptSender {
    fn send(&self, address: &str, message: &str) -> Result<(), SendError> {
        tracing::debug!(address, chars = message.chars().count(), "invoking osascript");

        let output = Command::new(OSASCRIPT)
            .args(Self::args(address, message))
            .output()
            .map_err(SendError::Spawn)?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(SendError::ScriptFailed(stderr.trim().to_string()))
        }
    }
}

/// Logs what would be sent and does nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunSender;

impl Sender for DryRunSender {
    fn send(&self, address: &str, message: &str) -> Result<(), SendError> {
        tracing::info!(address, message, "dry run: message not sent");
        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}
