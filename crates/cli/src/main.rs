//! `hdc`: inspect and normalize HERO System 6E character files.
//!
//! This binary is the composition root that assembles:
//! 1. Configuration from the environment (`.env` honoured)
//! 2. File logging under the platform cache directory
//! 3. Definition tables and engine options via `hero-content`
//! 4. One command against one `.hdc` file
//!
//! # Exit codes
//!
//! - `0`: success
//! - `1`: the command failed (unreadable or malformed file, bad data)
//! - `2`: invalid command line (reported by clap)
//!
//! # Examples
//!
//! ```bash
//! hdc summary hero.hdc
//! hdc json hero.hdc --pretty > hero.json
//! hdc normalize hero.hdc hero.clean.hdc
//! ```

mod commands;
mod config;
mod dirs;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use console::style;

use commands::{Json, Normalize, Summary};
use config::CliConfig;

/// Inspect and normalize HERO System 6E character files
#[derive(Parser)]
#[command(name = "hdc")]
#[command(about = "HERO System 6E character file tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Print point totals, rule violations and skill rolls
    Summary(Summary),

    /// Dump the parsed character as JSON
    Json(Json),

    /// Re-serialize a character file in canonical form
    Normalize(Normalize),
}

fn main() -> ExitCode {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = CliConfig::from_env();

    let _guard = match logging::setup_logging(&config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{} logging disabled: {:#}", style("warning:").yellow().bold(), e);
            None
        }
    };

    let result = match cli.command {
        Command::Summary(cmd) => cmd.execute(&config),
        Command::Json(cmd) => cmd.execute(&config),
        Command::Normalize(cmd) => cmd.execute(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("command failed: {:#}", e);
            eprintln!("{} {:#}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
