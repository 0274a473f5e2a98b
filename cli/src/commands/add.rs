//! # ziprs Add Command
//!
//! File: cli/src/commands/add.rs
//!
//! ## Overview
//!
//! Implements `ziprs add`, which builds a zip archive from files,
//! directories and glob patterns. Without positional entries the
//! configuration file's `entries` are used.
//!
//! ## Examples
//!
//! ```bash
//! # Archive a directory and a single file
//! ziprs -o release.zip add dist README.md
//!
//! # Use a glob, skip logs, store without compression
//! ziprs -o logs.zip -l 0 -i "*.tmp" add "logs/**/*.txt"
//! ```
//!
use crate::common::archive::{ArchiveBuilder, ArchiveExtractor};
use crate::core::error::Result;
use crate::core::orchestrator::Orchestrator;
use clap::Parser;
use tracing::{debug, info};

/// # Add Arguments (`AddArgs`)
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Files, directories or glob patterns to add.
    #[arg(value_name = "ENTRIES")]
    pub entries: Vec<String>,
}

/// # Handle Add Command (`handle_add`)
///
/// Queues the entries, writes the archive and prints the completion line
/// when an output file is set and `--quiet` is not.
pub async fn handle_add<B, E>(args: AddArgs, mut orchestrator: Orchestrator<B, E>) -> Result<()>
where
    B: ArchiveBuilder,
    E: ArchiveExtractor,
{
    info!("Handling add command...");
    debug!("Add args: {:?}", args);

    orchestrator.add(&args.entries)?;
    let summary = orchestrator.save().await?;
    if let Some(line) = orchestrator.build_report(&summary) {
        println!("{}", line);
    }
    Ok(())
}
