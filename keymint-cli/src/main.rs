//! keymint — license token and key management from the command line.
//!
//! Usage:
//!   keymint keypair generate --password hunter2
//!   keymint symmetric derive --password hunter2 --memory-cost 65536
//!   keymint license create --key k4.secret.… --request request.json
//!   keymint license verify --key k4.public.… --token v4.public.…
//!
//! Output is pretty-printed JSON on stdout; diagnostics go to stderr.
//! Exit codes: 0 on success, 1 on operation failure, 64 on usage errors.

mod commands;
mod io;

use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{keypair, license, salt, symmetric};

/// Exit code for command-line usage errors.
const EXIT_USAGE: u8 = 64;

#[derive(Parser, Debug)]
#[command(name = "keymint")]
#[command(about = "License token and key management")]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate and inspect Ed25519 signing key pairs
    Keypair {
        #[command(subcommand)]
        cmd: keypair::Cmd,
    },
    /// Generate, inspect, and derive symmetric keys
    Symmetric {
        #[command(subcommand)]
        cmd: symmetric::Cmd,
    },
    /// Generate salts for password-based derivation
    Salt {
        #[command(subcommand)]
        cmd: salt::Cmd,
    },
    /// Create, verify, encrypt, and decrypt license material
    License {
        #[command(subcommand)]
        cmd: license::Cmd,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_USAGE,
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Dispatches the parsed command; the returned code becomes the exit code.
fn run(cli: Cli) -> Result<u8> {
    match cli.command {
        Command::Keypair { cmd } => keypair::run(cmd),
        Command::Symmetric { cmd } => symmetric::run(cmd),
        Command::Salt { cmd } => salt::run(cmd),
        Command::License { cmd } => license::run(cmd),
    }
}
