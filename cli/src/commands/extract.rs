//! # ziprs Extract Command
//!
//! File: cli/src/commands/extract.rs
//!
//! ## Overview
//!
//! Implements `ziprs extract`, which extracts one or more zip archives into
//! the output directory, or writes their contents to stdout when no output
//! is set. Without positional archives the configuration file's `entries`
//! are used.
//!
//! ## Examples
//!
//! ```bash
//! ziprs -o unpacked extract release.zip
//! ziprs -f -o unpacked extract a.zip b.zip
//! ```
//!
use crate::common::archive::{ArchiveBuilder, ArchiveExtractor};
use crate::core::error::Result;
use crate::core::orchestrator::Orchestrator;
use clap::Parser;
use tracing::{debug, info};

/// # Extract Arguments (`ExtractArgs`)
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Zip archives to extract.
    #[arg(value_name = "ARCHIVES")]
    pub archives: Vec<String>,
}

/// # Handle Extract Command (`handle_extract`)
pub async fn handle_extract<B, E>(
    args: ExtractArgs,
    mut orchestrator: Orchestrator<B, E>,
) -> Result<()>
where
    B: ArchiveBuilder,
    E: ArchiveExtractor,
{
    info!("Handling extract command...");
    debug!("Extract args: {:?}", args);

    let summary = orchestrator.extract(&args.archives).await?;
    if let Some(line) = orchestrator.extract_report(&summary) {
        println!("{}", line);
    }
    Ok(())
}
