//! # ziprs Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the commands of the ziprs CLI and the option flags
//! shared by all of them.
//!
//! ## Command Groups
//!
//! - `add`: Build a zip archive from files, directories and glob patterns
//! - `extract`: Extract zip archives
//! - `file_mode`: Run the operation declared by the configuration file (no subcommand)
//!
//! Every handler receives an `Orchestrator` that has already resolved the
//! effective options from defaults, the configuration file and `GlobalArgs`.
//!
use crate::core::error::Result;
use crate::core::logging::LogLevelHandle;
use crate::core::options::{ConfigFileSetting, PartialOptions};
use crate::core::orchestrator::Orchestrator;
use crate::common::archive::{ZipBuilder, ZipExtractor};
use clap::Args;
use tracing::debug;

/// Implements `ziprs add`.
pub mod add;
/// Implements `ziprs extract`.
pub mod extract;
/// Implements the default run driven by the configuration file.
pub mod file_mode;

/// # Global Options (`GlobalArgs`)
///
/// Flags accepted before or after any subcommand. A flag that is not given
/// stays unspecified, so the configuration file can still provide it.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Don't look for a configuration file.
    #[arg(long, global = true, conflicts_with = "config")]
    pub noconfig: bool,

    /// Use a configuration file (default: .ziprsrc.json).
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<String>,

    /// Set the output file (add) or directory (extract). Defaults to stdout.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub output: Option<String>,

    /// Ignore a file or directory (glob pattern, repeatable).
    #[arg(short, long, value_name = "GLOB", global = true)]
    pub ignore: Vec<String>,

    /// Force overwriting existing files.
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Dereference (follow) symbolic links.
    #[arg(short, long, global = true)]
    pub dereference: bool,

    /// Set the compression level (0 stores without compression).
    #[arg(short, long, value_name = "0-9", global = true, value_parser = clap::value_parser!(u32).range(0..=9))]
    pub level: Option<u32>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Don't print the completion message.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl GlobalArgs {
    /// Converts the flags into the caller layer of the options merge.
    pub fn to_partial_options(&self) -> PartialOptions {
        let config_file = if self.noconfig {
            ConfigFileSetting::Disabled
        } else if let Some(path) = &self.config {
            ConfigFileSetting::Path(path.clone())
        } else {
            ConfigFileSetting::Default
        };

        PartialOptions {
            compression_level: self.level,
            config_file: Some(config_file),
            dereference_links: self.dereference.then_some(true),
            force: self.force.then_some(true),
            ignore_entries: (!self.ignore.is_empty()).then(|| self.ignore.clone()),
            output_entry: self.output.clone(),
            quiet: self.quiet.then_some(true),
            verbose: self.verbose.then_some(true),
        }
    }
}

/// Builds the orchestrator for `args` and applies the resolved verbosity to logging.
pub fn open_orchestrator(
    args: &GlobalArgs,
    log_level: &LogLevelHandle,
) -> Result<Orchestrator<ZipBuilder, ZipExtractor>> {
    let orchestrator = Orchestrator::new(args.to_partial_options())?;
    log_level.apply_verbosity(orchestrator.options().verbose)?;
    debug!("Effective options: {:?}", orchestrator.options());
    Ok(orchestrator)
}
