//! Contact commands: contacts, add-contact, and the interactive create flow.
//!
//! CHANGELOG:
//! - 10/18/2026 - Interactive create flow for the menu
//! - 10/18/2026 - List and add against the explicit JsonStore

use super::console::Console;
use crate::contacts::directory::{self, DirectoryError};
use crate::contacts::store::JsonStore;
use crate::output::OutputControls;
use anyhow::Result;
use colored::*;
use serde_json::json;
use std::io::{self, BufRead, Write};

/// List all contacts.
pub fn list<W: Write>(store: &JsonStore, output: &OutputControls, out: &mut W) -> Result<()> {
    let contacts = directory::list_contacts(&store.load());

    if output.json {
        output.write(out, &contacts)?;
        return Ok(());
    }

    if contacts.is_empty() {
        writeln!(out, "No contacts found.")?;
        writeln!(out, "Add one with 'group-texter add-contact <name> <phone>'.")?;
        return Ok(());
    }

    writeln!(out, "Contacts ({}):", contacts.len())?;
    writeln!(out, "{}", "-".repeat(50))?;
    for contact in &contacts {
        writeln!(out, "{}: {}", contact.name, contact.phone)?;
    }
    Ok(())
}

/// Add a new contact, or overwrite an existing one with the same name.
pub fn add<W: Write>(
    store: &JsonStore,
    name: &str,
    phone: &str,
    output: &OutputControls,
    out: &mut W,
) -> Result<()> {
    let entry = directory::create_contact(store, name, phone)?;

    if output.json {
        output.write(
            out,
            &json!({
                "success": true,
                "name": entry.name,
                "phone": entry.phone
            }),
        )?;
    } else {
        writeln!(out, "Added contact: {} ({})", entry.name, entry.phone)?;
    }
    Ok(())
}

/// Menu action: prompt for name and number, then create the contact.
pub fn create_interactive<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &JsonStore,
) -> io::Result<()> {
    console.heading("Create Contact")?;

    let Some(name) = console.prompt("Enter contact name: ".yellow())? else {
        return Ok(());
    };
    let Some(phone) = console.prompt("Enter phone number: ".cyan())? else {
        return Ok(());
    };

    match directory::create_contact(store, &name, &phone) {
        Ok(entry) => console.success(&format!("Contact '{}' added successfully!", entry.name)),
        Err(DirectoryError::Validation(e)) => console.error(&format!("Error: {}!", e)),
        Err(DirectoryError::Store(e)) => console.error(&e.to_string()),
    }
}
