//! Contact creation and read-only directory views.
//!
//! Every operation takes the store explicitly and reloads the document
//! before touching it.

use super::store::{Document, JsonStore, StoreError};
use super::validate::{validate_contact, ValidationError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A contact as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactEntry {
    pub name: String,
    pub phone: String,
}

/// A group member as shown in listings. `phone` is `None` when the member
/// name no longer matches a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberEntry {
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupEntry {
    pub name: String,
    pub members: Vec<MemberEntry>,
}

/// Create or overwrite a contact.
///
/// Inputs are trimmed. Nothing is written unless validation passes.
pub fn create_contact(store: &JsonStore, name: &str, number: &str) -> Result<ContactEntry, DirectoryError> {
    let name = name.trim();
    let number = number.trim();
    validate_contact(name, number)?;

    let mut doc = store.load();
    if let Some(previous) = doc.contacts.insert(name.to_string(), number.to_string()) {
        tracing::info!(name, previous = %previous, "overwriting existing contact");
    }
    store.save(&doc)?;

    Ok(ContactEntry {
        name: name.to_string(),
        phone: number.to_string(),
    })
}

pub fn list_contacts(doc: &Document) -> Vec<ContactEntry> {
    doc.contacts
        .iter()
        .map(|(name, phone)| ContactEntry {
            name: name.clone(),
            phone: phone.clone(),
        })
        .collect()
}

pub fn group_view(doc: &Document, name: &str) -> Option<GroupEntry> {
    doc.groups.get(name).map(|members| GroupEntry {
        name: name.to_string(),
        members: members
            .iter()
            .map(|m| MemberEntry {
                name: m.clone(),
                phone: doc.contacts.get(m).cloned(),
            })
            .collect(),
    })
}

pub fn list_groups(doc: &Document) -> Vec<GroupEntry> {
    doc.groups
        .keys()
        .filter_map(|name| group_view(doc, name))
        .collect()
}
