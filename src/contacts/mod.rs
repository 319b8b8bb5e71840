//! Contacts and groups: persistence, validation and editing.

pub mod directory;
pub mod fuzzy;
pub mod group_editor;
pub mod store;
pub mod validate;
