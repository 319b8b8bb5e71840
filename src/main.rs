//! group-texter - contact and group manager for iMessage
//!
//! Keeps contacts and groups in a JSON file and sends personalised messages
//! through Messages.app. With no subcommand, runs the interactive menu.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial CLI with interactive menu and subcommands

use clap::{Parser, Subcommand};
use group_texter::applescript::{AppleScriptSender, DryRunSender, Sender};
use group_texter::commands::{self, console::Console};
use group_texter::contacts::store::{resolve_data_path, JsonStore};
use group_texter::output;
use std::io;
use std::process::ExitCode;

/// Contact and group manager that sends messages via Messages.app.
#[derive(Parser, Debug)]
#[command(name = "group-texter")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the contacts/groups JSON file
    /// (default: $GROUP_TEXTER_DATA_FILE, then ./contacts.json)
    #[arg(long, global = true)]
    data_file: Option<String>,

    /// Output as JSON (listing and send commands)
    #[arg(long, global = true)]
    json: bool,

    /// Compact JSON output (no whitespace)
    #[arg(long, global = true)]
    compact: bool,

    /// Log messages instead of sending them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive menu (default)
    Menu,

    // =========================================================================
    // CONTACT COMMANDS
    // =========================================================================
    /// List all contacts
    Contacts,

    /// Add a contact (overwrites an existing contact with the same name)
    AddContact {
        /// Contact name
        name: String,

        /// Phone number, exactly 10 digits
        phone: String,
    },

    // =========================================================================
    // GROUP COMMANDS
    // =========================================================================
    /// List all groups with their members
    Groups,

    /// Add contacts to a group (creates the group if needed)
    GroupAdd {
        /// Group name
        group: String,

        /// Contact names to add
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Remove members from a group
    GroupRemove {
        /// Group name
        group: String,

        /// Member names to remove
        #[arg(required = true)]
        names: Vec<String>,
    },

    // =========================================================================
    // MESSAGING COMMANDS
    // =========================================================================
    /// Send a message to a contact or to every member of a group
    Send {
        /// Contact or group name
        recipient: String,

        /// Message to send
        #[arg(required = true)]
        message: Vec<String>,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let output_controls = output::OutputControls {
        json: cli.json,
        compact: cli.compact,
    };

    let store = JsonStore::new(resolve_data_path(cli.data_file.as_deref()));
    tracing::debug!(path = ?store.path(), "using data file");

    let sender: Box<dyn Sender> = if cli.dry_run {
        Box::new(DryRunSender)
    } else {
        Box::new(AppleScriptSender)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let mut console = Console::new(io::stdin().lock(), out);
            commands::menu::run(&mut console, &store, &*sender).map_err(anyhow::Error::from)
        }

        // Contact commands
        Command::Contacts => commands::contacts::list(&store, &output_controls, &mut out),
        Command::AddContact { name, phone } => {
            commands::contacts::add(&store, &name, &phone, &output_controls, &mut out)
        }

        // Group commands
        Command::Groups => commands::groups::list(&store, &output_controls, &mut out),
        Command::GroupAdd { group, names } => {
            commands::groups::add_members(&store, &group, &names, &output_controls, &mut out)
        }
        Command::GroupRemove { group, names } => {
            commands::groups::remove_members(&store, &group, &names, &output_controls, &mut out)
        }

        // Messaging commands
        Command::Send { recipient, message } => commands::messaging::send(
            &store,
            &*sender,
            &recipient,
            &message.join(" "),
            &output_controls,
            &mut out,
        ),
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            if cli.json {
                println!("{}", output::format_error(&e.to_string()));
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(1)
        }
    }
}
