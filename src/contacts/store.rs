//! JSON persistence for contacts and groups.
//!
//! The whole document is read on every operation and rewritten in full on
//! every save. Writes go through a temp file + rename so a crash mid-write
//! never leaves a truncated `contacts.json`.
//!
//! CHANGELOG:
//! - 10/18/2026 - Atomic writes via tempfile
//! - 10/18/2026 - Initial implementation

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Default file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "contacts.json";

/// Env var overriding the data file location.
pub const DATA_FILE_ENV: &str = "GROUP_TEXTER_DATA_FILE";

/// Resolve the data file path.
///
/// Order:
/// 1. Explicit path (from `--data-file`)
/// 2. GROUP_TEXTER_DATA_FILE env var
/// 3. `contacts.json` in the working directory
///
/// A leading `~` is expanded in either of the first two.
pub fn resolve_data_path(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(shellexpand::tilde(path).to_string());
    }

    if let Ok(path) = std::env::var(DATA_FILE_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(shellexpand::tilde(&path).to_string());
        }
    }

    PathBuf::from(DEFAULT_DATA_FILE)
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON format in {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error saving data to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The persisted document: contact name -> number, group name -> members.
///
/// Maps keep insertion order, so saving a loaded file leaves its key order
/// as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub contacts: IndexMap<String, String>,
    #[serde(default)]
    pub groups: IndexMap<String, Vec<String>>,
}

impl Document {
    pub fn contact_number(&self, name: &str) -> Option<&str> {
        self.contacts.get(name).map(String::as_str)
    }

    pub fn group_members(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    /// Serialize with 4-space indentation.
    pub fn to_pretty_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}

/// File-backed store for the contacts document.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, never failing.
    ///
    /// A missing file is an empty document. An unreadable or corrupt file is
    /// also treated as empty, with a warning; it is left on disk untouched
    /// until the next save overwrites it.
    pub fn load(&self) -> Document {
        match self.load_checked() {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                tracing::debug!(path = ?self.path, "data file missing, starting empty");
                Document::default()
            }
            Err(e) => {
                tracing::warn!("{}. Resetting to empty contacts and groups", e);
                Document::default()
            }
        }
    }

    /// Strict load. `Ok(None)` means the file does not exist.
    pub fn load_checked(&self) -> Result<Option<Document>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    /// Write the full document atomically.
    pub fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let data = doc.to_pretty_json().map_err(|e| write_err(e.into()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(&data).map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::debug!(
            path = ?self.path,
            contacts = doc.contacts.len(),
            groups = doc.groups.len(),
            "saved data file"
        );
        Ok(())
    }
}
