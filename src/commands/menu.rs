//! The interactive main menu.
//!
//! One state, "awaiting choice". Each valid choice runs an action and comes
//! back here; `4` or end of input leaves.

use super::console::Console;
use super::{contacts, groups, messaging};
use crate::applescript::Sender;
use crate::contacts::store::JsonStore;
use colored::*;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateContact,
    EditGroup,
    SendMessage,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::CreateContact),
            "2" => Some(MenuChoice::EditGroup),
            "3" => Some(MenuChoice::SendMessage),
            "4" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

fn show_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.line("")?;
    console.line("\t=== Message Scheduler ===".magenta().bold())?;
    console.line("1. Create Contact".cyan())?;
    console.line("2. Create/Edit Group".cyan())?;
    console.line("3. Send Message".cyan())?;
    console.line("4. Exit".cyan())
}

/// Run the menu until the user exits or input ends.
pub fn run<R: BufRead, W: Write, S: Sender + ?Sized>(
    console: &mut Console<R, W>,
    store: &JsonStore,
    sender: &S,
) -> io::Result<()> {
    tracing::debug!(path = ?store.path(), "starting interactive menu");

    loop {
        show_menu(console)?;
        let Some(line) = console.prompt("Enter your choice: ".yellow())? else {
            break;
        };

        match MenuChoice::parse(&line) {
            Some(MenuChoice::CreateContact) => contacts::create_interactive(console, store)?,
            Some(MenuChoice::EditGroup) => groups::edit_interactive(console, store)?,
            Some(MenuChoice::SendMessage) => messaging::send_interactive(console, store, sender)?,
            Some(MenuChoice::Exit) => {
                console.line("🚀 Exiting... Goodbye!".green())?;
                break;
            }
            None => console.error("Invalid choice. Please try again.")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applescript::testing::RecordingSender;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_parse_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::CreateContact));
        assert_eq!(MenuChoice::parse(" 4 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("5"), None);
        assert_eq!(MenuChoice::parse(""), None);
        assert_eq!(MenuChoice::parse("exit"), None);
    }

    #[test]
    fn test_full_session() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("contacts.json"));
        let sender = RecordingSender::default();
        let script = [
            "1", "Alice Smith", "1111111111",
            "1", "Bob", "2222222222",
            "1", "Carol", "123",
            "2", "Team", "1", "Alice Smith", "1", "Bob", "3",
            "x",
            "3", "Team", "Hi",
            "3", "Nobody",
            "4",
            "1", "Never", "3333333333",
        ]
        .join("\n");
        let mut console = Console::new(Cursor::new(script), Vec::new());

        run(&mut console, &store, &sender).unwrap();

        let doc = store.load();
        assert_eq!(doc.contacts.len(), 2);
        assert!(doc.contact_number("Carol").is_none());
        assert!(doc.contact_number("Never").is_none());
        assert_eq!(
            sender.calls(),
            vec![
                ("1111111111".to_string(), "Alice, Hi".to_string()),
                ("2222222222".to_string(), "Bob, Hi".to_string()),
            ]
        );

        let text = String::from_utf8(console.into_output()).unwrap();
        assert!(text.contains("Invalid choice. Please try again."));
        assert!(text.contains("Contact or group 'Nobody' not found!"));
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn test_invalid_utf8_choice_loops_back() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("contacts.json"));
        let input: &[u8] = b"\xff\xfe\n1\nAlice\n1234567890\n4\n";
        let mut console = Console::new(Cursor::new(input), Vec::new());

        run(&mut console, &store, &RecordingSender::default()).unwrap();

        assert_eq!(store.load().contact_number("Alice"), Some("1234567890"));
        let text = String::from_utf8(console.into_output()).unwrap();
        assert!(text.contains("Invalid choice. Please try again."));
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn test_eof_exits() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("contacts.json"));
        let mut console = Console::new(Cursor::new(""), Vec::new());

        run(&mut console, &store, &RecordingSender::default()).unwrap();
    }
}
