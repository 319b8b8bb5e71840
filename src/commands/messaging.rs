//! Messaging commands: send, and the interactive send flow.
//!
//! CHANGELOG:
//! - 10/18/2026 - Group fan-out through the dispatcher
//! - 10/18/2026 - Exact-name resolution against the local directory

use super::console::Console;
use crate::applescript::Sender;
use crate::contacts::store::JsonStore;
use crate::dispatch::{self, DispatchError, DispatchReport};
use crate::output::OutputControls;
use anyhow::{bail, Result};
use colored::*;
use serde::Serialize;
use std::io::{self, BufRead, Write};

/// JSON shape of a send result.
#[derive(Serialize)]
struct SendResult<'a> {
    success: bool,
    #[serde(flatten)]
    report: &'a DispatchReport,
}

fn not_found_message(err: &DispatchError) -> String {
    match err {
        DispatchError::NotFound {
            suggestion: Some(s),
            ..
        } => format!("{}. Did you mean '{}'?", err, s),
        DispatchError::NotFound { .. } => format!("{}!", err),
    }
}

fn report_lines(report: &DispatchReport) -> (Vec<String>, Vec<String>) {
    let ok: Vec<String> = report
        .sent
        .iter()
        .map(|s| {
            if report.dry_run {
                format!("[dry run] Would send message to {}: {}", s.address, s.message)
            } else {
                format!("Sent message to {}: {}", s.address, s.message)
            }
        })
        .collect();

    let failed: Vec<String> = report
        .failed
        .iter()
        .map(|f| format!("Failed to send to {} ({}): {}", f.name, f.address, f.error))
        .chain(
            report
                .skipped
                .iter()
                .map(|name| format!("Skipped '{}': not in contacts", name)),
        )
        .collect();

    (ok, failed)
}

/// One-line reason a send did not fully succeed.
fn failure_summary(report: &DispatchReport) -> String {
    let mut parts = Vec::new();
    if !report.failed.is_empty() {
        parts.push(format!(
            "{} of {} messages failed",
            report.failed.len(),
            report.failed.len() + report.sent.len()
        ));
    }
    if !report.skipped.is_empty() {
        parts.push(format!(
            "{} group member(s) skipped: not in contacts",
            report.skipped.len()
        ));
    }
    parts.join("; ")
}

/// Send a message to a contact or every member of a group.
pub fn send<S: Sender + ?Sized, W: Write>(
    store: &JsonStore,
    sender: &S,
    recipient: &str,
    message: &str,
    output: &OutputControls,
    out: &mut W,
) -> Result<()> {
    let report = match dispatch::send_message(store, sender, recipient, message) {
        Ok(report) => report,
        Err(e) => bail!(not_found_message(&e)),
    };

    if output.json {
        output.write(
            out,
            &SendResult {
                success: report.success(),
                report: &report,
            },
        )?;
    } else {
        let (ok, failed) = report_lines(&report);
        for line in ok {
            writeln!(out, "{}", line)?;
        }
        for line in failed {
            writeln!(out, "{}", line)?;
        }
    }

    if !report.success() {
        bail!(failure_summary(&report));
    }
    Ok(())
}

/// Menu action: ask for a recipient, then for the message only once the
/// recipient is known.
pub fn send_interactive<R: BufRead, W: Write, S: Sender + ?Sized>(
    console: &mut Console<R, W>,
    store: &JsonStore,
    sender: &S,
) -> io::Result<()> {
    let doc = store.load();

    let Some(name) = console.prompt("Enter name or group to send message: ".yellow())? else {
        return Ok(());
    };
    let recipient = match dispatch::resolve_recipient(&doc, &name) {
        Ok(r) => r,
        Err(e) => return console.error(&not_found_message(&e)),
    };

    let Some(message) = console.prompt("Type your message: ".cyan())? else {
        return Ok(());
    };

    let (outgoing, skipped) = dispatch::plan(&doc, &recipient, &message);
    let report = dispatch::dispatch(sender, &recipient, outgoing, skipped);

    let (ok, failed) = report_lines(&report);
    for line in ok {
        console.success(&line)?;
    }
    for line in failed {
        console.error(&line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applescript::testing::RecordingSender;
    use crate::contacts::store::Document;
    use std::io::Cursor;
    use tempfile::{tempdir, TempDir};

    fn seeded() -> (TempDir, JsonStore) {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("contacts.json"));
        let mut doc = Document::default();
        doc.contacts.insert("Alice".into(), "1111111111".into());
        doc.contacts.insert("Bob".into(), "2222222222".into());
        doc.groups
            .insert("Team".into(), vec!["Alice".into(), "Bob".into()]);
        store.save(&doc).unwrap();
        (dir, store)
    }

    #[test]
    fn test_send_group_output() {
        let (_dir, store) = seeded();
        let sender = RecordingSender::default();
        let mut out = Vec::new();

        send(&store, &sender, "Team", "Hi", &OutputControls::default(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Sent message to 1111111111: Alice, Hi"));
        assert!(text.contains("Sent message to 2222222222: Bob, Hi"));
    }

    #[test]
    fn test_send_unknown_is_error() {
        let (_dir, store) = seeded();
        let sender = RecordingSender::default();
        let mut out = Vec::new();

        let err = send(&store, &sender, "Tema", "Hi", &OutputControls::default(), &mut out).unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("Did you mean 'Team'?"));
        assert!(sender.calls().is_empty());
    }

    #[test]
    fn test_send_failure_is_error() {
        let (_dir, store) = seeded();
        let sender = RecordingSender::failing_for(&["2222222222"]);
        let mut out = Vec::new();

        let err = send(&store, &sender, "Team", "Hi", &OutputControls::default(), &mut out).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 messages failed");
        assert_eq!(sender.calls().len(), 1);
    }

    #[test]
    fn test_send_group_of_missing_members_is_error() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("contacts.json"));
        let mut doc = Document::default();
        doc.groups.insert("Team".into(), vec!["Ghost".into()]);
        store.save(&doc).unwrap();
        let sender = RecordingSender::default();
        let output = OutputControls {
            json: true,
            compact: true,
        };
        let mut out = Vec::new();

        let err = send(&store, &sender, "Team", "Hi", &output, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "1 group member(s) skipped: not in contacts");
        assert!(sender.calls().is_empty());

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["skipped"][0], "Ghost");
        assert_eq!(value["recipient"], "Team");
    }

    #[test]
    fn test_send_json_reports_success() {
        let (_dir, store) = seeded();
        let output = OutputControls {
            json: true,
            compact: true,
        };
        let mut out = Vec::new();

        send(&store, &RecordingSender::default(), "Alice", "Hi", &output, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["dry_run"], false);
        assert_eq!(value["sent"][0]["address"], "1111111111");
    }

    #[test]
    fn test_dry_run_output_is_marked() {
        let (_dir, store) = seeded();
        let mut out = Vec::new();

        send(
            &store,
            &crate::applescript::DryRunSender,
            "Team",
            "Hi",
            &OutputControls::default(),
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[dry run] Would send message to 1111111111: Alice, Hi"));
        assert!(!text.contains("Sent message to"));
    }

    #[test]
    fn test_send_interactive_contact() {
        let (_dir, store) = seeded();
        let sender = RecordingSender::default();
        let mut console = Console::new(Cursor::new("Alice\nSee you at 5\n"), Vec::new());

        send_interactive(&mut console, &store, &sender).unwrap();
        assert_eq!(
            sender.calls(),
            vec![("1111111111".to_string(), "See you at 5".to_string())]
        );
    }

    #[test]
    fn test_send_interactive_unknown_skips_message_prompt() {
        let (_dir, store) = seeded();
        let sender = RecordingSender::default();
        let mut console = Console::new(Cursor::new("Nobody\nHello\n"), Vec::new());

        send_interactive(&mut console, &store, &sender).unwrap();

        let text = String::from_utf8(console.into_output()).unwrap();
        assert!(text.contains("Contact or group 'Nobody' not found!"));
        assert!(!text.contains("Type your message"));
        assert!(sender.calls().is_empty());
    }
}
