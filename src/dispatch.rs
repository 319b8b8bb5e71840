//! Recipient resolution and message dispatch.
//!
//! A recipient name resolves to a contact first, then to a group. Group
//! sends are personalised per member ("Alice, <message>") and go out in
//! stored member order.
//!
//! CHANGELOG:
//! - 10/18/2026 - Skip group members missing from contacts instead of aborting
//! - 10/18/2026 - Initial implementation

use crate::applescript::Sender;
use crate::contacts::fuzzy;
use crate::contacts::store::{Document, JsonStore};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Contact or group '{name}' not found")]
    NotFound {
        name: String,
        suggestion: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Contact { name: String, address: String },
    Group { name: String, members: Vec<String> },
}

impl Recipient {
    pub fn name(&self) -> &str {
        match self {
            Recipient::Contact { name, .. } | Recipient::Group { name, .. } => name,
        }
    }
}

/// One message bound for one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outgoing {
    pub name: String,
    pub address: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDelivery {
    pub name: String,
    pub address: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub recipient: String,
    pub sent: Vec<Outgoing>,
    pub failed: Vec<FailedDelivery>,
    /// Group members with no matching contact.
    pub skipped: Vec<String>,
    /// Nothing was actually delivered; `sent` lists what would have gone out.
    pub dry_run: bool,
}

impl DispatchReport {
    /// Every resolved member was sent to. Skipped members count as failures.
    pub fn success(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

/// Contacts win over groups with the same name.
pub fn resolve_recipient(doc: &Document, name: &str) -> Result<Recipient, DispatchError> {
    let name = name.trim();

    if let Some(address) = doc.contact_number(name) {
        return Ok(Recipient::Contact {
            name: name.to_string(),
            address: address.to_string(),
        });
    }

    if let Some(members) = doc.group_members(name) {
        return Ok(Recipient::Group {
            name: name.to_string(),
            members: members.to_vec(),
        });
    }

    let candidates = doc.contacts.keys().chain(doc.groups.keys()).map(String::as_str);
    Err(DispatchError::NotFound {
        name: name.to_string(),
        suggestion: fuzzy::suggest(name, candidates).map(String::from),
    })
}

/// Prefix `message` with the member's first name.
///
/// "Alice Smith" + "Hi" -> "Alice, Hi". A name with no tokens leaves the
/// message as-is.
pub fn personalize(member: &str, message: &str) -> String {
    match member.split_whitespace().next() {
        Some(first) => format!("{}, {}", first, message),
        None => message.to_string(),
    }
}

/// Expand a recipient into concrete sends. Returns the sends plus the
/// names of group members that have no contact entry.
pub fn plan(doc: &Document, recipient: &Recipient, message: &str) -> (Vec<Outgoing>, Vec<String>) {
    match recipient {
        Recipient::Contact { name, address } => (
            vec![Outgoing {
                name: name.clone(),
                address: address.clone(),
                message: message.to_string(),
            }],
            Vec::new(),
        ),
        Recipient::Group { name: group, members } => {
            let mut outgoing = Vec::with_capacity(members.len());
            let mut skipped = Vec::new();
            for member in members {
                match doc.contact_number(member) {
                    Some(address) => outgoing.push(Outgoing {
                        name: member.clone(),
                        address: address.to_string(),
                        message: personalize(member, message),
                    }),
                    None => {
                        tracing::warn!(group = %group, member = %member, "group member has no contact entry, skipping");
                        skipped.push(member.clone());
                    }
                }
            }
            (outgoing, skipped)
        }
    }
}

/// Send every planned message. One failure does not stop the rest.
pub fn dispatch<S: Sender + ?Sized>(
    sender: &S,
    recipient: &Recipient,
    outgoing: Vec<Outgoing>,
    skipped: Vec<String>,
) -> DispatchReport {
    let mut report = DispatchReport {
        recipient: recipient.name().to_string(),
        skipped,
        dry_run: sender.is_dry_run(),
        ..Default::default()
    };

    for out in outgoing {
        match sender.send(&out.address, &out.message) {
            Ok(()) => {
                tracing::info!(to = %out.name, address = %out.address, "message sent");
                report.sent.push(out);
            }
            Err(e) => {
                tracing::error!(to = %out.name, address = %out.address, "{}", e);
                report.failed.push(FailedDelivery {
                    name: out.name,
                    address: out.address,
                    error: e.to_string(),
                });
            }
        }
    }

    report
}

/// Resolve, plan and dispatch in one go.
pub fn send_message<S: Sender + ?Sized>(
    store: &JsonStore,
    sender: &S,
    recipient_name: &str,
    message: &str,
) -> Result<DispatchReport, DispatchError> {
    let doc = store.load();
    let recipient = resolve_recipient(&doc, recipient_name)?;
    let (outgoing, skipped) = plan(&doc, &recipient, message);
    Ok(dispatch(sender, &recipient, outgoing, skipped))
}
