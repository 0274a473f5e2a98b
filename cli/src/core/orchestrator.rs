//! # ziprs Orchestrator
//!
//! File: cli/src/core/orchestrator.rs
//!
//! ## Overview
//!
//! The `Orchestrator` turns the caller's options into a resolved `Options`
//! record and drives the archive collaborators with it. Construction
//! runs the whole configuration pipeline once:
//!
//! 1. `config::load_config_file` reads the configuration file, if any.
//! 2. `config::split_payload` removes `entries` and `mode` from the payload.
//! 3. `Options::resolve` merges defaults < file < caller.
//! 4. The collaborators are built from the resolved options.
//!
//! Nothing is mutated afterwards except the collaborators' own state.
//!
//! ## Operations
//!
//! - `add` / `extract` / `save`: pass-throughs to the collaborators. Explicit entries
//!   win over the configuration file's `entries`.
//! - `run_file_mode`: runs the operation named by the configuration file's `mode`
//!   with its `entries`.
//!
//! The configured mode cannot be overridden by the caller. It only selects
//! what `run_file_mode` runs.
//!
//! ## Examples
//!
//! ```rust
//! let mut orchestrator = Orchestrator::new(caller_options)?;
//! if let Some(line) = orchestrator.run_file_mode().await? {
//!     println!("{}", line);
//! }
//! ```
//!
use crate::common::archive::{
    ArchiveBuilder, ArchiveExtractor, BuildSummary, ExtractSummary, ZipBuilder, ZipExtractor,
};
use crate::core::config::{self, Mode, SplitPayload};
use crate::core::error::{Result, ZiprsError};
use crate::core::options::{Options, PartialOptions};
use anyhow::Context;
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Owns the resolved options, the configuration side-channel and the collaborators.
pub struct Orchestrator<B, E> {
    options: Options,
    entries: Option<Vec<String>>,
    mode: Option<Mode>,
    builder: B,
    extractor: E,
}

impl Orchestrator<ZipBuilder, ZipExtractor> {
    /// Resolves options relative to the current directory and sets up the zip collaborators.
    ///
    /// # Arguments
    ///
    /// * `caller` - Options from the command line. Unset fields fall through to
    ///   the configuration file, then to the defaults.
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - An orchestrator backed by `ZipBuilder` and `ZipExtractor`.
    ///
    /// # Errors
    ///
    /// Fails if the working directory is unavailable, or with any error of
    /// `with_collaborators`.
    pub fn new(caller: PartialOptions) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to get current directory")?;
        let builder_cwd = cwd.clone();
        let extractor_cwd = cwd.clone();
        Self::with_collaborators(
            caller,
            &cwd,
            move |options| ZipBuilder::new(options, builder_cwd),
            move |options| ZipExtractor::new(options, extractor_cwd),
        )
    }
}

impl<B: ArchiveBuilder, E: ArchiveExtractor> Orchestrator<B, E> {
    /// Runs the configuration pipeline against `cwd` and builds the
    /// collaborators from the resolved options.
    ///
    /// # Arguments
    ///
    /// * `caller` - Caller-supplied options; `config_file` selects the configuration file.
    /// * `cwd` - Absolute directory relative paths are resolved against.
    /// * `make_builder` / `make_extractor` - Factories receiving the resolved `Options`.
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The orchestrator holding the resolved options, the
    ///   configured `entries`/`mode` and both collaborators.
    ///
    /// # Errors
    ///
    /// Propagates `ConfigFileNotAccessible`, `ConfigFileMalformed` and
    /// `InvalidMode` from the configuration file.
    pub fn with_collaborators<FB, FE>(
        caller: PartialOptions,
        cwd: &Path,
        make_builder: FB,
        make_extractor: FE,
    ) -> Result<Self>
    where
        FB: FnOnce(&Options) -> B,
        FE: FnOnce(&Options) -> E,
    {
        // 1. Locate and parse the configuration file (if any).
        let setting = caller.config_file.clone().unwrap_or_default();
        let loaded = config::load_config_file(&setting, cwd)?;

        // 2. Separate the side-channel keys from the option overrides.

        let (split, config_path) = match loaded {
            Some(file) => (config::split_payload(file.payload, &file.path)?, Some(file.path)),
            None => (SplitPayload::default(), None),
        };
        let file_layer = match &config_path {
            Some(path) => PartialOptions::from_payload(split.remaining, path)?,
            None => PartialOptions::default(),
        };

        // 3. Defaults < file < caller.
        let options = Options::resolve(file_layer, &caller, config_path);

        Ok(Self {
            builder: make_builder(&options),
            extractor: make_extractor(&options),
            entries: split.entries,
            mode: split.mode,
            options,
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The `mode` declared in the configuration file.
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// The `entries` declared in the configuration file.
    pub fn entries(&self) -> Option<&[String]> {
        self.entries.as_deref()
    }

    #[cfg(test)]
    fn builder(&self) -> &B {
        &self.builder
    }

    #[cfg(test)]
    fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Explicit entries if any were given, else the configured ones if non-empty.
    fn resolve_entries(&self, explicit: &[String]) -> Option<Vec<String>> {
        if !explicit.is_empty() {
            return Some(explicit.to_vec());
        }
        self.entries.clone().filter(|entries| !entries.is_empty())
    }

    /// Queues entries on the builder and returns it for chaining (e.g. `save`).
    ///
    /// # Arguments
    ///
    /// * `entries` - Explicit entries; when empty, the configured `entries` are used.
    ///
    /// # Returns
    ///
    /// * `Result<&mut B>` - The builder, with the entries queued.
    ///
    /// # Errors
    ///
    /// - `ZiprsError::NoEntriesToAdd` if neither source provides entries.
    /// - Any builder error, unchanged.
    pub fn add(&mut self, entries: &[String]) -> Result<&mut B> {
        let entries = self
            .resolve_entries(entries)
            .ok_or(ZiprsError::NoEntriesToAdd)?;
        self.builder.add(&entries)
    }

    /// Extracts the given archives, falling back to the configured `entries`.
    ///
    /// # Arguments
    ///
    /// * `entries` - Archive paths; when empty, the configured `entries` are used.
    ///
    /// # Returns
    ///
    /// * `Result<ExtractSummary>` - Where the members went and how many were written.
    ///
    /// # Errors
    ///
    /// - `ZiprsError::NoEntriesToExtract` if neither source provides entries.
    /// - Any extractor error, unchanged.
    pub async fn extract(&mut self, entries: &[String]) -> Result<ExtractSummary> {
        let entries = self
            .resolve_entries(entries)
            .ok_or(ZiprsError::NoEntriesToExtract)?;
        self.extractor.extract(&entries).await
    }

    /// Writes the archive queued by `add`.
    pub async fn save(&mut self) -> Result<BuildSummary> {
        self.builder.save().await
    }

    /// Runs the operation selected by the configuration file's `mode`.
    ///
    /// Returns the completion line when one should be shown (see `build_report`).
    ///
    /// # Errors
    ///
    /// - `ZiprsError::NoModeDefined` if the configuration declared no mode.
    /// - `ZiprsError::NoEntriesProvided` if it declared no (or empty) entries.
    /// - Any collaborator error, unchanged.
    pub async fn run_file_mode(&mut self) -> Result<Option<String>> {
        let mode = self.mode.ok_or(ZiprsError::NoModeDefined)?;
        info!("Running mode \"{}\" from configuration file", mode);

        let entries = self
            .resolve_entries(&[])
            .ok_or(ZiprsError::NoEntriesProvided)?;

        match mode {
            Mode::Add => {
                let summary = self.builder.add(&entries)?.save().await?;
                Ok(self.build_report(&summary))
            }
            Mode::Extract => {
                let summary = self.extractor.extract(&entries).await?;
                Ok(self.extract_report(&summary))
            }
        }
    }

    /// Completion line for a build, shown only with an output path and without `quiet`.
    pub fn build_report(&self, summary: &BuildSummary) -> Option<String> {
        debug!("Build finished: {:?}", summary);
        self.should_report().then(|| {
            format!(
                "Done compressing {} files to \"{}\".",
                summary.compressed_files_count, summary.output_file
            )
        })
    }

    /// Completion line for an extraction, gated like `build_report`.
    pub fn extract_report(&self, summary: &ExtractSummary) -> Option<String> {
        debug!("Extraction finished: {:?}", summary);
        self.should_report().then(|| {
            format!(
                "Done extracting {} files to \"{}\".",
                summary.extracted_files_count, summary.output_dir
            )
        })
    }

    fn should_report(&self) -> bool {
        self.options.output_entry.is_some() && !self.options.quiet
    }
}
