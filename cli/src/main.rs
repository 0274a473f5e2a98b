//! # ziprs Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the ziprs CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on the verbosity flag
//! - Building the orchestrator and routing to the selected command
//!
//! ## Examples
//!
//! ```bash
//! # Build an archive
//! ziprs -o out.zip add src README.md
//!
//! # Extract it again
//! ziprs -o unpacked extract out.zip
//!
//! # Run whatever .ziprsrc.json declares
//! ziprs
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging from `--verbose`
//! 3. Resolve options (defaults < configuration file < flags)
//! 4. Route to the command handler, or to file mode without a subcommand
//! 5. Print any error and exit with status 1
//!
use clap::{Parser, Subcommand};

mod commands; // Command handlers and shared flags.
mod common; // Archive collaborators and filesystem helpers.
mod core; // Configuration, options, orchestration, errors, logging.

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "ziprs",
    about = "Build and extract zip archives",
    long_about = "Build and extract zip archives.\n\
                  Without a subcommand, runs the mode declared in the configuration file (.ziprsrc.json).",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    options: commands::GlobalArgs,
}

/// Available commands. None selects file mode.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Add files and directories to a new zip archive.
    #[command(alias = "a")]
    Add(commands::add::AddArgs),
    /// Extract files and directories from zip archives.
    #[command(alias = "e")]
    Extract(commands::extract::ExtractArgs),
}

async fn run(cli: Cli, log_level: &crate::core::logging::LogLevelHandle) -> crate::core::error::Result<()> {
    let orchestrator = commands::open_orchestrator(&cli.options, log_level)?;
    match cli.command {
        Some(Commands::Add(args)) => commands::add::handle_add(args, orchestrator).await,
        Some(Commands::Extract(args)) => {
            commands::extract::handle_extract(args, orchestrator).await
        }
        None => commands::file_mode::handle_file_mode(orchestrator).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_level = crate::core::logging::init_logging(cli.options.verbose)?;

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli, &log_level).await {
        tracing::debug!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
