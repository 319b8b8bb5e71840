//! Group editing as an explicit state machine.
//!
//! The editor owns a loaded copy of the document. Members are added and
//! removed in memory; nothing is written until `Save`. Dropping the editor
//! without saving discards the edits.
//!
//! ```text
//! Viewing --Add--> Adding --Submit(name)--> Viewing
//! Viewing --Remove--> Removing --Submit(name)--> Viewing
//! Viewing --Save--> Exited
//! ```
//!
//! CHANGELOG:
//! - 10/18/2026 - Reject duplicate members
//! - 10/18/2026 - Initial implementation

use super::directory::{group_view, GroupEntry};
use super::fuzzy;
use super::store::{Document, JsonStore};
use super::validate::{validate_group_name, ValidationError};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Viewing,
    Adding,
    Removing,
    Exited,
}

impl fmt::Display for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EditorState::Viewing => "viewing",
            EditorState::Adding => "adding",
            EditorState::Removing => "removing",
            EditorState::Exited => "exited",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    Add,
    Remove,
    /// A member name, valid only while adding or removing.
    Submit(String),
    Save,
}

/// What a successful transition did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Entered `Adding` or `Removing`; the next command should be `Submit`.
    AwaitingName,
    MemberAdded(String),
    AlreadyMember(String),
    UnknownContact {
        name: String,
        suggestion: Option<String>,
    },
    MemberRemoved(String),
    NotAMember {
        name: String,
        suggestion: Option<String>,
    },
    Saved,
    /// The editor still exits; the write error is reported, not raised.
    SaveFailed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot {command:?} while {state}")]
pub struct InvalidTransition {
    pub state: EditorState,
    pub command: EditorCommand,
}

pub struct GroupEditor<'a> {
    store: &'a JsonStore,
    doc: Document,
    group: String,
    state: EditorState,
}

impl<'a> GroupEditor<'a> {
    /// Load the document and open `group_name`, creating it empty if absent.
    pub fn open(store: &'a JsonStore, group_name: &str) -> Result<Self, ValidationError> {
        let group = group_name.trim();
        validate_group_name(group)?;

        let mut doc = store.load();
        doc.groups.entry(group.to_string()).or_default();

        Ok(Self {
            store,
            doc,
            group: group.to_string(),
            state: EditorState::Viewing,
        })
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn group_name(&self) -> &str {
        &self.group
    }

    pub fn members(&self) -> &[String] {
        self.doc.group_members(&self.group).unwrap_or(&[])
    }

    /// Current members with their numbers, for display.
    pub fn view(&self) -> GroupEntry {
        group_view(&self.doc, &self.group).unwrap_or_else(|| GroupEntry {
            name: self.group.clone(),
            members: Vec::new(),
        })
    }

    pub fn apply(&mut self, command: EditorCommand) -> Result<EditorEvent, InvalidTransition> {
        let (next, event) = match (self.state, command) {
            (EditorState::Viewing, EditorCommand::Add) => {
                (EditorState::Adding, EditorEvent::AwaitingName)
            }
            (EditorState::Viewing, EditorCommand::Remove) => {
                (EditorState::Removing, EditorEvent::AwaitingName)
            }
            (EditorState::Viewing, EditorCommand::Save) => (EditorState::Exited, self.save()),
            (EditorState::Adding, EditorCommand::Submit(name)) => {
                (EditorState::Viewing, self.add_member(name.trim()))
            }
            (EditorState::Removing, EditorCommand::Submit(name)) => {
                (EditorState::Viewing, self.remove_member(name.trim()))
            }
            (state, command) => return Err(InvalidTransition { state, command }),
        };

        tracing::debug!(group = %self.group, from = %self.state, to = %next, ?event, "group editor transition");
        self.state = next;
        Ok(event)
    }

    fn members_mut(&mut self) -> &mut Vec<String> {
        self.doc.groups.entry(self.group.clone()).or_default()
    }

    fn add_member(&mut self, name: &str) -> EditorEvent {
        if !self.doc.contacts.contains_key(name) {
            let suggestion =
                fuzzy::suggest(name, self.doc.contacts.keys().map(String::as_str)).map(String::from);
            return EditorEvent::UnknownContact {
                name: name.to_string(),
                suggestion,
            };
        }

        let members = self.members_mut();
        if members.iter().any(|m| m == name) {
            return EditorEvent::AlreadyMember(name.to_string());
        }
        members.push(name.to_string());
        EditorEvent::MemberAdded(name.to_string())
    }

    fn remove_member(&mut self, name: &str) -> EditorEvent {
        let members = self.members_mut();
        match members.iter().position(|m| m == name) {
            Some(idx) => {
                members.remove(idx);
                EditorEvent::MemberRemoved(name.to_string())
            }
            None => {
                let suggestion = fuzzy::suggest(name, self.members().iter().map(String::as_str))
                    .map(String::from);
                EditorEvent::NotAMember {
                    name: name.to_string(),
                    suggestion,
                }
            }
        }
    }

    fn save(&mut self) -> EditorEvent {
        match self.store.save(&self.doc) {
            Ok(()) => EditorEvent::Saved,
            Err(e) => {
                tracing::error!(group = %self.group, "{}", e);
                EditorEvent::SaveFailed(e.to_string())
            }
        }
    }
}
