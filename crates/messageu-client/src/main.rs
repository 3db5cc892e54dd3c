// ============================================
// File: crates/messageu-client/src/main.rs
// ============================================
//! # MessageU Console Entry Point
//!
//! ## Creation Reason
//! Interactive terminal front end for the messaging pipeline: a numbered
//! menu that drives registration, discovery, key exchange, and messaging.
//!
//! ## Main Functionality
//! - CLI argument parsing with clap (configuration file overrides)
//! - Logging initialization with tracing
//! - The menu loop over `MessagingClient`
//!
//! ## Usage
//! ```bash
//! # Default files (server.info / my.info) in the working directory
//! messageu
//!
//! # Explicit configuration paths
//! messageu --server-info /etc/messageu/server.info --client-info ~/.messageu/my.info
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - The console is a thin consumer of the boolean API; all protocol and
//!   crypto behaviour belongs in the library crates
//! - Every failure path prints the client's error buffer verbatim
//!
//! ## Last Modified
//! v0.1.0 - Initial console implementation

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use messageu_client::config::SERVER_INFO_FILE;
use messageu_client::identity::CLIENT_INFO_FILE;
use messageu_client::{IncomingMessage, MessagingClient};
use messageu_core::protocol::{MessageKind, ProtocolVersion};

// ============================================
// CLI Definition
// ============================================

/// MessageU secure messaging client
#[derive(Parser, Debug)]
#[command(name = "messageu")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the relay endpoint file (single line HOST:PORT)
    #[arg(long, default_value = SERVER_INFO_FILE)]
    server_info: PathBuf,

    /// Path to the identity file
    #[arg(long, default_value = CLIENT_INFO_FILE)]
    client_info: PathBuf,
}

// ============================================
// Menu Definition
// ============================================

/// One menu command: its number, label, whether it needs a registered
/// identity, and the line printed on success.
struct MenuCommand {
    number: u32,
    label: &'static str,
    needs_identity: bool,
    confirmation: &'static str,
}

const MENU: &[MenuCommand] = &[
    MenuCommand {
        number: 110,
        label: "Register",
        needs_identity: false,
        confirmation: "Account successfully created.",
    },
    MenuCommand {
        number: 120,
        label: "Request for client list",
        needs_identity: true,
        confirmation: "",
    },
    MenuCommand {
        number: 130,
        label: "Request for public key",
        needs_identity: true,
        confirmation: "Public key retrieved successfully.",
    },
    MenuCommand {
        number: 140,
        label: "Request for waiting messages",
        needs_identity: true,
        confirmation: "",
    },
    MenuCommand {
        number: 150,
        label: "Send a text message",
        needs_identity: true,
        confirmation: "Message delivered successfully.",
    },
    MenuCommand {
        number: 151,
        label: "Send a request for symmetric key",
        needs_identity: true,
        confirmation: "Symmetric key request sent successfully.",
    },
    MenuCommand {
        number: 152,
        label: "Send your symmetric key",
        needs_identity: true,
        confirmation: "Symmetric key shared successfully.",
    },
    MenuCommand {
        number: 153,
        label: "Send a file",
        needs_identity: true,
        confirmation: "File transferred successfully.",
    },
    MenuCommand {
        number: 0,
        label: "Exit client",
        needs_identity: false,
        confirmation: "",
    },
];

// ============================================
// Main
// ============================================

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut client = MessagingClient::with_paths(cli.server_info, cli.client_info);
    if !client.prepare() {
        anyhow::bail!("startup failed: {}", client.last_error());
    }

    println!("MessageU client, protocol {}.", ProtocolVersion::current());
    if client.is_registered() {
        println!("Hello {}, welcome back!", client.self_name());
    } else {
        println!("Welcome! Register to get started.");
    }

    loop {
        show_menu();
        let choice = capture_input("?")?;
        let Ok(number) = choice.parse::<u32>() else {
            println!("Unknown option '{choice}'. Please choose from the menu.");
            continue;
        };
        let Some(command) = MENU.iter().find(|c| c.number == number) else {
            println!("Unknown option '{number}'. Please choose from the menu.");
            continue;
        };

        if command.number == 0 {
            println!("Goodbye.");
            return Ok(());
        }
        if command.needs_identity && !client.is_registered() {
            println!("Please register first (option 110).");
            continue;
        }

        let succeeded = run_command(command, &mut client)?;
        if succeeded {
            if !command.confirmation.is_empty() {
                println!("{}", command.confirmation);
            }
        } else {
            println!("Operation failed:\n{}", client.last_error());
        }
        println!();
    }
}

// ============================================
// Command Dispatch
// ============================================

/// Executes one menu command; returns the operation outcome.
fn run_command(command: &MenuCommand, client: &mut MessagingClient) -> anyhow::Result<bool> {
    let ok = match command.number {
        110 => {
            if client.is_registered() {
                println!("Already registered as {}.", client.self_name());
                true
            } else {
                let name = capture_input("Enter a display name:")?;
                client.register(&name)
            }
        }
        120 => {
            if client.fetch_users() {
                show_users(&client.users_sorted());
                true
            } else {
                false
            }
        }
        130 => {
            let name = capture_input("Enter a user name:")?;
            client.fetch_public_key(&name)
        }
        140 => match client.fetch_pending() {
            Some(messages) => {
                show_messages(&messages);
                // Per-record skips are non-fatal but worth surfacing
                if !client.last_error().is_empty() {
                    println!("Some messages were skipped:\n{}", client.last_error());
                }
                true
            }
            None => false,
        },
        150 => {
            let name = capture_input("Enter a user name:")?;
            let text = capture_input("Enter the message:")?;
            client.send_message(&name, MessageKind::Text, Some(&text))
        }
        151 => {
            let name = capture_input("Enter a user name:")?;
            client.send_message(&name, MessageKind::KeyRequest, None)
        }
        152 => {
            let name = capture_input("Enter a user name:")?;
            client.send_message(&name, MessageKind::KeySend, None)
        }
        153 => {
            let name = capture_input("Enter a user name:")?;
            let path = capture_input("Enter the file path:")?;
            client.send_message(&name, MessageKind::File, Some(&path))
        }
        _ => {
            println!("Unknown option.");
            true
        }
    };
    Ok(ok)
}

// ============================================
// Display Helpers
// ============================================

fn show_menu() {
    println!("MessageU client at your service.");
    for command in MENU {
        println!("{:>3}) {}", command.number, command.label);
    }
}

fn show_users(names: &[String]) {
    if names.is_empty() {
        println!("No other registered users.");
        return;
    }
    println!("Registered users:");
    for name in names {
        println!("  {name}");
    }
}

fn show_messages(messages: &[IncomingMessage]) {
    if messages.is_empty() {
        println!("No waiting messages.");
        return;
    }
    for message in messages {
        println!("From: {}", message.from);
        println!("Content:");
        println!("{}", message.body);
        println!("-----<EOM>-----");
    }
}

// ============================================
// Input Helpers
// ============================================

/// Prompts and reads one trimmed line from stdin.
fn capture_input(prompt: &str) -> anyhow::Result<String> {
    if !prompt.is_empty() {
        print!("{prompt} ");
        std::io::stdout().flush()?;
    }
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Initializes the tracing subscriber.
///
/// Defaults to warnings only so the menu stays readable; `RUST_LOG`
/// overrides as usual.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init()
        .ok();
}
