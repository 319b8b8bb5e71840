//! Group commands: groups, group-add, group-remove, and the interactive editor.
//!
//! Both the subcommands and the menu drive the same `GroupEditor` state
//! machine; only the source of commands differs.
//!
//! CHANGELOG:
//! - 10/18/2026 - Interactive editor loop over GroupEditor
//! - 10/18/2026 - Replaced chat.db group listing with directory groups

use super::console::Console;
use crate::contacts::directory;
use crate::contacts::group_editor::{EditorCommand, EditorEvent, EditorState, GroupEditor};
use crate::contacts::store::JsonStore;
use crate::output::OutputControls;
use anyhow::{anyhow, bail, Result};
use colored::*;
use serde_json::json;
use std::io::{self, BufRead, Write};

/// List all groups with their members.
pub fn list<W: Write>(store: &JsonStore, output: &OutputControls, out: &mut W) -> Result<()> {
    let groups = directory::list_groups(&store.load());

    if output.json {
        output.write(out, &groups)?;
        return Ok(());
    }

    if groups.is_empty() {
        writeln!(out, "No groups found.")?;
        return Ok(());
    }

    writeln!(out, "Groups ({}):", groups.len())?;
    writeln!(out, "{:-<60}", "")?;
    for g in &groups {
        writeln!(out, "{} ({} members)", g.name, g.members.len())?;
        for m in &g.members {
            writeln!(out, "  - {} ({})", m.name, m.phone.as_deref().unwrap_or("Unknown"))?;
        }
    }
    Ok(())
}

/// Human-readable line for an editor event. `Err` text for failures.
fn describe(event: &EditorEvent) -> std::result::Result<String, String> {
    let with_hint = |base: String, suggestion: &Option<String>| match suggestion {
        Some(s) => format!("{} Did you mean '{}'?", base, s),
        None => base,
    };

    match event {
        EditorEvent::AwaitingName => Ok(String::new()),
        EditorEvent::MemberAdded(_) => Ok("Contact added successfully!".to_string()),
        EditorEvent::MemberRemoved(_) => Ok("Member removed successfully!".to_string()),
        EditorEvent::Saved => Ok("Group saved.".to_string()),
        EditorEvent::AlreadyMember(name) => Err(format!("'{}' is already in this group.", name)),
        EditorEvent::UnknownContact { name, suggestion } => Err(with_hint(
            format!("Contact '{}' does not exist. Please add it first.", name),
            suggestion,
        )),
        EditorEvent::NotAMember { name, suggestion } => Err(with_hint(
            format!("Member '{}' not found in this group.", name),
            suggestion,
        )),
        EditorEvent::SaveFailed(e) => Err(format!("Error saving data: {}", e)),
    }
}

/// Run one add-or-remove batch through the editor and save.
fn edit_batch<W: Write>(
    store: &JsonStore,
    group: &str,
    verb: EditorCommand,
    names: &[String],
    output: &OutputControls,
    out: &mut W,
) -> Result<()> {
    let mut editor = GroupEditor::open(store, group)?;

    let mut errors = Vec::new();
    for name in names {
        editor.apply(verb.clone())?;
        let event = editor.apply(EditorCommand::Submit(name.clone()))?;
        if let Err(msg) = describe(&event) {
            errors.push(msg);
        }
    }

    // Partial batches are not saved
    if !errors.is_empty() {
        bail!("{}", errors.join("\n"));
    }

    if let EditorEvent::SaveFailed(e) = editor.apply(EditorCommand::Save)? {
        return Err(anyhow!("Error saving data: {}", e));
    }

    let view = directory::group_view(&store.load(), editor.group_name())
        .ok_or_else(|| anyhow!("Group '{}' missing after save", editor.group_name()))?;

    if output.json {
        output.write(out, &json!({ "success": true, "group": view }))?;
    } else {
        let members: Vec<&str> = view.members.iter().map(|m| m.name.as_str()).collect();
        writeln!(out, "Group '{}' updated: {}", view.name, members.join(", "))?;
    }
    Ok(())
}

/// Add contacts to a group, creating the group if needed.
pub fn add_members<W: Write>(
    store: &JsonStore,
    group: &str,
    names: &[String],
    output: &OutputControls,
    out: &mut W,
) -> Result<()> {
    edit_batch(store, group, EditorCommand::Add, names, output, out)
}

/// Remove members from a group.
pub fn remove_members<W: Write>(
    store: &JsonStore,
    group: &str,
    names: &[String],
    output: &OutputControls,
    out: &mut W,
) -> Result<()> {
    edit_batch(store, group, EditorCommand::Remove, names, output, out)
}

fn show_editor<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    editor: &GroupEditor<'_>,
) -> io::Result<()> {
    console.heading(&format!("Editing Group: {}", editor.group_name()))?;
    console.line("Current Members:".green())?;
    for m in editor.view().members {
        console.line(format!("- {} ({})", m.name, m.phone.as_deref().unwrap_or("Unknown")))?;
    }
    console.line("\nOptions:".cyan())?;
    console.line("1. Add Member")?;
    console.line("2. Remove Member")?;
    console.line("3. Save and Exit")
}

/// Menu action: create or edit a group until the user saves.
///
/// End of input abandons the edit without saving.
pub fn edit_interactive<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &JsonStore,
) -> io::Result<()> {
    console.heading("Create/Edit Group")?;

    let Some(group) = console.prompt("Enter group name: ".yellow())? else {
        return Ok(());
    };
    let mut editor = match GroupEditor::open(store, &group) {
        Ok(editor) => editor,
        Err(e) => return console.error(&format!("{}!", e)),
    };

    while editor.state() != EditorState::Exited {
        if editor.state() == EditorState::Viewing {
            show_editor(console, &editor)?;
        }

        let label = match editor.state() {
            EditorState::Adding => "Enter contact name: ".yellow(),
            EditorState::Removing => "Enter contact name to remove: ".yellow(),
            _ => "Enter your choice: ".magenta(),
        };
        let Some(line) = console.prompt(label)? else {
            tracing::debug!(group = %editor.group_name(), "input closed, discarding group edits");
            return Ok(());
        };

        let command = match editor.state() {
            EditorState::Adding | EditorState::Removing => EditorCommand::Submit(line),
            _ => match line.as_str() {
                "1" => EditorCommand::Add,
                "2" => EditorCommand::Remove,
                "3" => EditorCommand::Save,
                _ => {
                    console.error("Invalid choice. Please try again.")?;
                    continue;
                }
            },
        };

        match editor.apply(command) {
            Ok(EditorEvent::Saved) => {
                console.success(&format!("Group '{}' updated successfully!", editor.group_name()))?
            }
            Ok(event) => match describe(&event) {
                Ok(msg) if msg.is_empty() => {}
                Ok(msg) => console.success(&msg)?,
                Err(msg) => console.error(&msg)?,
            },
            Err(e) => console.error(&e.to_string())?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::store::Document;
    use std::io::Cursor;
    use tempfile::{tempdir, TempDir};

    fn seeded() -> (TempDir, JsonStore) {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("contacts.json"));
        let mut doc = Document::default();
        doc.contacts.insert("Alice Smith".into(), "1111111111".into());
        doc.contacts.insert("Bob".into(), "2222222222".into());
        store.save(&doc).unwrap();
        (dir, store)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_members_creates_group() {
        let (_dir, store) = seeded();
        let mut out = Vec::new();

        add_members(&store, "Team", &names(&["Alice Smith", "Bob"]), &OutputControls::default(), &mut out)
            .unwrap();

        assert_eq!(
            store.load().group_members("Team").unwrap(),
            &names(&["Alice Smith", "Bob"])[..]
        );
        assert!(String::from_utf8(out).unwrap().contains("Group 'Team' updated: Alice Smith, Bob"));
    }

    #[test]
    fn test_add_unknown_member_saves_nothing() {
        let (_dir, store) = seeded();
        let mut out = Vec::new();

        let err = add_members(&store, "Team", &names(&["Bob", "Carol"]), &OutputControls::default(), &mut out)
            .unwrap_err();

        assert!(err.to_string().contains("Contact 'Carol' does not exist"));
        assert!(store.load().group_members("Team").is_none());
    }

    #[test]
    fn test_remove_members() {
        let (_dir, store) = seeded();
        let mut out = Vec::new();
        let output = OutputControls::default();
        add_members(&store, "Team", &names(&["Alice Smith", "Bob"]), &output, &mut out).unwrap();

        remove_members(&store, "Team", &names(&["Alice Smith"]), &output, &mut out).unwrap();
        assert_eq!(store.load().group_members("Team").unwrap(), &names(&["Bob"])[..]);

        assert!(remove_members(&store, "Team", &names(&["Alice Smith"]), &output, &mut out).is_err());
    }

    #[test]
    fn test_list_shows_unknown_members() {
        let (_dir, store) = seeded();
        let mut doc = store.load();
        doc.groups.insert("Team".into(), names(&["Bob", "Ghost"]));
        store.save(&doc).unwrap();
        let mut out = Vec::new();

        list(&store, &OutputControls::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Team (2 members)"));
        assert!(text.contains("- Bob (2222222222)"));
        assert!(text.contains("- Ghost (Unknown)"));
    }

    #[test]
    fn test_edit_interactive_add_remove_save() {
        let (_dir, store) = seeded();
        let script = "Team\n1\nBob\n1\nAlice Smith\n2\nBob\n1\nCarol\n9\n3\n";
        let mut console = Console::new(Cursor::new(script), Vec::new());

        edit_interactive(&mut console, &store).unwrap();

        let text = String::from_utf8(console.into_output()).unwrap();
        assert!(text.contains("Contact added successfully!"));
        assert!(text.contains("Member removed successfully!"));
        assert!(text.contains("Contact 'Carol' does not exist"));
        assert!(text.contains("Invalid choice"));
        assert!(text.contains("Group 'Team' updated successfully!"));
        assert_eq!(
            store.load().group_members("Team").unwrap(),
            &names(&["Alice Smith"])[..]
        );
    }

    #[test]
    fn test_edit_interactive_eof_discards() {
        let (_dir, store) = seeded();
        let mut console = Console::new(Cursor::new("Team\n1\nBob\n"), Vec::new());

        edit_interactive(&mut console, &store).unwrap();
        assert!(store.load().group_members("Team").is_none());
    }

    #[test]
    fn test_edit_interactive_empty_name() {
        let (_dir, store) = seeded();
        let mut console = Console::new(Cursor::new("\n"), Vec::new());

        edit_interactive(&mut console, &store).unwrap();
        let text = String::from_utf8(console.into_output()).unwrap();
        assert!(text.contains("Group name cannot be empty!"));
    }
}
