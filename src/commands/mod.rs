//! Command implementations.
//!
//! CHANGELOG:
//! - 10/18/2026 - Interactive menu and console
//! - 10/18/2026 - Reduced to contacts, groups and messaging

pub mod console;
pub mod contacts;
pub mod groups;
pub mod menu;
pub mod messaging;
