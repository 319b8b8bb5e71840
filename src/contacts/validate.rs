//! Input validation for contacts and groups.
//!
//! CHANGELOG:
//! - 10/18/2026 - Phone pattern moved to a shared OnceLock regex
//! - 10/18/2026 - Initial implementation

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn phone_re() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("phone regex is valid"))
}

/// Reasons a contact or group name is rejected before anything is persisted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name and number cannot be empty")]
    EmptyName,

    #[error("Name and number cannot be empty")]
    EmptyNumber,

    #[error("Invalid phone number '{0}'. Please enter a valid 10-digit number")]
    InvalidNumber(String),

    #[error("Group name cannot be empty")]
    EmptyGroupName,
}

/// True iff `s` is exactly ten ASCII digits, no separators or prefix.
pub fn is_valid_phone_number(s: &str) -> bool {
    phone_re().is_match(s)
}

/// Check a (name, number) pair. Inputs are expected to be trimmed already.
pub fn validate_contact(name: &str, number: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if number.is_empty() {
        return Err(ValidationError::EmptyNumber);
    }
    if !is_valid_phone_number(number) {
        return Err(ValidationError::InvalidNumber(number.to_string()));
    }
    Ok(())
}

pub fn validate_group_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        Err(ValidationError::EmptyGroupName)
    } else {
        Ok(())
    }
}
