//! # ziprs File Mode
//!
//! File: cli/src/commands/file_mode.rs
//!
//! ## Overview
//!
//! Runs when `ziprs` is invoked without a subcommand. The configuration file
//! decides what happens through its `mode` (`"add"` or `"extract"`) and
//! `entries` keys; all other keys and the command-line flags shape the
//! options as usual.
//!
//! ```bash
//! # .ziprsrc.json: { "mode": "add", "entries": ["src"], "outputEntry": "src.zip" }
//! ziprs
//!
//! # Same, with a configuration file elsewhere
//! ziprs -c build/zip.json
//! ```
//!
use crate::common::archive::{ArchiveBuilder, ArchiveExtractor};
use crate::core::error::Result;
use crate::core::orchestrator::Orchestrator;
use tracing::{debug, info};

/// # Handle File Mode (`handle_file_mode`)
pub async fn handle_file_mode<B, E>(mut orchestrator: Orchestrator<B, E>) -> Result<()>
where
    B: ArchiveBuilder,
    E: ArchiveExtractor,
{
    info!("No command given, running from configuration file...");
    debug!(
        "Configured mode: {:?}, entries: {:?}",
        orchestrator.mode(),
        orchestrator.entries()
    );
    if let Some(line) = orchestrator.run_file_mode().await? {
        println!("{}", line);
    }
    Ok(())
}
