//! workdiary: keep the monthly work diary tab in step with the team roster.
//!
//! # Usage
//!
//! ```text
//! workdiary sync  [--date YYYY-MM-DD] [--config <path>]
//! workdiary plan  [--date YYYY-MM-DD] [--config <path>]
//! workdiary dates [--date YYYY-MM-DD]
//! workdiary init  --document-url <url> --credentials <path> [--force] [--config <path>]
//! ```

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use commands::{dates::DatesArgs, init::InitArgs, plan::PlanArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "workdiary",
    version,
    about = "Create and maintain the monthly work diary tab of a team spreadsheet",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create or update the month tab: roster, holiday highlight, index entry.
    Sync(SyncArgs),

    /// Show what `sync` would do without writing anything.
    Plan(PlanArgs),

    /// Print the month's tab title and date columns. Works offline.
    Dates(DatesArgs),

    /// Write a config file.
    Init(InitArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Plan(args) => args.run(),
        Commands::Dates(args) => args.run(),
        Commands::Init(args) => args.run(),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "✗".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr at `info` unless `RUST_LOG` says otherwise. Library crates
/// log through the `log` facade, which the subscriber picks up.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
