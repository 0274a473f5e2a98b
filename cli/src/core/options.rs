//! # ziprs Options Resolution
//!
//! File: cli/src/core/options.rs
//!
//! ## Overview
//!
//! This module owns the canonical options record (`Options`) and the merge
//! that produces it. Three layers contribute, lowest precedence first:
//!
//! 1. Built-in defaults (`Options::default()`)
//! 2. Overrides found in the configuration file
//! 3. Options supplied by the caller (the command line)
//!
//! Each layer is a `PartialOptions` (every field optional) except the
//! defaults. The merge walks the fixed field set, so the source of every
//! resolved field is known statically.
//!
//! ## Examples
//!
//! ```rust
//! let file = PartialOptions::from_payload(remaining, &config_path)?;
//! let options = Options::resolve(file, &caller, Some(config_path));
//! assert!(options.compression_level <= MAX_COMPRESSION_LEVEL);
//! ```
//!
use crate::core::config::RawConfigPayload;
use crate::core::error::{Result, ZiprsError};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Highest compression level understood by the archive engine.
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Keys the configuration file may use to override options.
const OPTION_KEYS: [&str; 7] = [
    "compressionLevel",
    "dereferenceLinks",
    "force",
    "ignoreEntries",
    "outputEntry",
    "quiet",
    "verbose",
];

/// How the configuration file should be located.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "RawConfigFileSetting")]
pub enum ConfigFileSetting {
    /// Look for the default file in the working directory; absence is fine.
    #[default]
    Default,
    /// Do not consult any configuration file.
    Disabled,
    /// Use this file; it must be readable.
    Path(String),
}

/// Wire form of `ConfigFileSetting`: `true`, `false` or a path string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawConfigFileSetting {
    Flag(bool),
    Path(String),
}

impl From<RawConfigFileSetting> for ConfigFileSetting {
    fn from(raw: RawConfigFileSetting) -> Self {
        match raw {
            RawConfigFileSetting::Flag(true) => ConfigFileSetting::Default,
            RawConfigFileSetting::Flag(false) => ConfigFileSetting::Disabled,
            RawConfigFileSetting::Path(path) => ConfigFileSetting::Path(path),
        }
    }
}

/// One precedence layer: every field is optional, `None` falls through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOptions {
    pub compression_level: Option<u32>,
    pub config_file: Option<ConfigFileSetting>,
    pub dereference_links: Option<bool>,
    pub force: Option<bool>,
    pub ignore_entries: Option<Vec<String>>,
    pub output_entry: Option<String>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
}

impl PartialOptions {
    /// Builds the file layer from a payload already stripped of `entries`/`mode`.
    ///
    /// Unknown keys and `configFile` are logged and dropped. A value of the
    /// wrong type fails with `ZiprsError::ConfigFileMalformed` naming `source`.
    pub fn from_payload(mut remaining: RawConfigPayload, source: &Path) -> Result<Self> {
        if remaining.remove("configFile").is_some() {
            warn!(
                "Ignoring \"configFile\" in configuration file \"{}\".",
                source.display()
            );
        }
        remaining.retain(|key, _| {
            let known = OPTION_KEYS.contains(&key.as_str());
            if !known {
                warn!(
                    "Ignoring unknown option \"{}\" in configuration file \"{}\".",
                    key,
                    source.display()
                );
            }
            known
        });

        serde_json::from_value(Value::Object(remaining)).map_err(|e| {
            anyhow::Error::new(ZiprsError::ConfigFileMalformed {
                path: source.display().to_string(),
                reason: e.to_string(),
            })
        })
    }
}

/// The fully resolved options handed to the archive collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub compression_level: u32,
    /// Absolute path of the configuration file that was read, if any.
    pub config_file: Option<PathBuf>,
    pub dereference_links: bool,
    /// Overwrite existing output files.
    pub force: bool,
    pub ignore_entries: Vec<String>,
    /// Output file (add) or directory (extract). `None` means stdout.
    pub output_entry: Option<String>,
    pub quiet: bool,
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            compression_level: 5,
            config_file: None,
            dereference_links: false,
            force: false,
            ignore_entries: Vec::new(),
            output_entry: None,
            quiet: false,
            verbose: false,
        }
    }
}

impl Options {
    /// Merges defaults < `file` < `caller`, field by field.
    ///
    /// `config_file` is recorded as-is; it is the path actually read and is
    /// not taken from either layer.
    pub fn resolve(file: PartialOptions, caller: &PartialOptions, config_file: Option<PathBuf>) -> Self {
        let defaults = Options::default();
        let caller = caller.clone();

        let mut compression_level = caller
            .compression_level
            .or(file.compression_level)
            .unwrap_or(defaults.compression_level);
        if compression_level > MAX_COMPRESSION_LEVEL {
            warn!(
                "Compression level {} is out of range, using {}.",
                compression_level, MAX_COMPRESSION_LEVEL
            );
            compression_level = MAX_COMPRESSION_LEVEL;
        }

        let options = Options {
            compression_level,
            config_file,
            dereference_links: caller
                .dereference_links
                .or(file.dereference_links)
                .unwrap_or(defaults.dereference_links),
            force: caller.force.or(file.force).unwrap_or(defaults.force),
            ignore_entries: caller
                .ignore_entries
                .or(file.ignore_entries)
                .unwrap_or(defaults.ignore_entries),
            output_entry: caller.output_entry.or(file.output_entry).or(defaults.output_entry),
            quiet: caller.quiet.or(file.quiet).unwrap_or(defaults.quiet),
            verbose: caller.verbose.or(file.verbose).unwrap_or(defaults.verbose),
        };
        debug!("Resolved options: {:?}", options);
        options
    }
}
