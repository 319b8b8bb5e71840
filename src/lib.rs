//! group-texter library
//!
//! Contacts and groups kept in a JSON file, with messages sent through
//! Messages.app via AppleScript.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial library structure

pub mod applescript;
pub mod commands;
pub mod contacts;
pub mod dispatch;
pub mod output;
