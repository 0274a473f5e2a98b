//! # ziprs Configuration File
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module locates, reads and parses the optional JSON configuration
//! file, and separates the two orchestration-only keys (`entries`, `mode`)
//! from the keys that override options.
//!
//! ## Architecture
//!
//! - `load_config_file`: Resolves the file from a `ConfigFileSetting` and parses it.
//!   An explicit path must be readable; the default path may be missing.
//! - `split_payload`: Pure split of a parsed payload into `entries`, `mode` and the
//!   remaining option overrides.
//!
//! Reading and parsing fail with distinct errors
//! (`ConfigFileNotAccessible` vs `ConfigFileMalformed`).
//!
//! ## Examples
//!
//! ```json
//! {
//!   "mode": "add",
//!   "entries": ["src/**", "README.md"],
//!   "outputEntry": "dist/source.zip",
//!   "ignoreEntries": ["*.log"],
//!   "compressionLevel": 9
//! }
//! ```
//!
//! ```rust
//! let loaded = config::load_config_file(&ConfigFileSetting::Default, &cwd)?;
//! let split = match loaded {
//!     Some(file) => config::split_payload(file.payload, &file.path)?,
//!     None => SplitPayload::default(),
//! };
//! ```
//!
use crate::common::fs::io::{read_file_bytes, resolve_path};
use crate::core::error::{Result, ZiprsError};
use crate::core::options::ConfigFileSetting;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILENAME: &str = ".ziprsrc.json";

/// The parsed configuration file: an open mapping from keys to values.
pub type RawConfigPayload = Map<String, Value>;

/// The operation a configuration file asks to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Add,
    Extract,
}

impl FromStr for Mode {
    type Err = ZiprsError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "add" => Ok(Mode::Add),
            "extract" => Ok(Mode::Extract),
            other => Err(ZiprsError::InvalidMode {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Add => write!(f, "add"),
            Mode::Extract => write!(f, "extract"),
        }
    }
}

/// A configuration file that was found and parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    /// Absolute path of the file.
    pub path: PathBuf,
    pub payload: RawConfigPayload,
}

/// The payload with the orchestration keys taken out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitPayload {
    pub entries: Option<Vec<String>>,
    pub mode: Option<Mode>,
    /// Every other key, untouched.
    pub remaining: RawConfigPayload,
}

/// Loads the configuration file selected by `setting`, resolving paths against `cwd`.
///
/// The file is first read as raw bytes; only an I/O failure counts as "not
/// accessible". The bytes are then parsed as JSON, and anything that is not
/// a UTF-8 JSON object counts as "malformed", for the default file too.
///
/// # Arguments
///
/// * `setting` - `Default` (optional `.ziprsrc.json` in `cwd`), `Disabled`, or an explicit `Path`.
/// * `cwd` - Absolute directory relative paths are resolved against.
///
/// # Returns
///
/// * `Ok(Some(LoadedConfig))` - The absolute, normalized path and its parsed payload.
/// * `Ok(None)` - Configuration is disabled, or the default file cannot be read.
///
/// # Errors
///
/// - `ZiprsError::ConfigFileNotAccessible` if an explicit path cannot be read.
/// - `ZiprsError::ConfigFileMalformed` if a readable file is not a JSON object.
pub fn load_config_file(setting: &ConfigFileSetting, cwd: &Path) -> Result<Option<LoadedConfig>> {
    // `strict`: an unreadable file is an error rather than "no configuration".
    let (path, strict) = match setting {
        ConfigFileSetting::Disabled => {
            info!("Not using any configuration file.");
            return Ok(None);
        }
        ConfigFileSetting::Default => (resolve_path(DEFAULT_CONFIG_FILENAME, cwd), false),
        ConfigFileSetting::Path(raw) => (resolve_path(raw, cwd), true),
    };

    // A single read doubles as the accessibility check.
    let content = match read_file_bytes(&path) {
        Ok(content) => content,
        Err(e) if strict => {
            debug!("Reading {:?} failed: {:#}", path, e);
            anyhow::bail!(ZiprsError::ConfigFileNotAccessible {
                path: path.display().to_string(),
            });
        }
        Err(e) => {
            debug!("Reading {:?} failed: {:#}", path, e);
            info!("Not using any configuration file (default configuration file not found).");
            return Ok(None);
        }
    };

    info!("Using configuration file \"{}\".", path.display());

    // Invalid UTF-8 is a parse error here, not a read error.
    let payload = match serde_json::from_slice::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(other) => anyhow::bail!(ZiprsError::ConfigFileMalformed {
            path: path.display().to_string(),
            reason: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
        Err(e) => anyhow::bail!(ZiprsError::ConfigFileMalformed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    };

    debug!("Configuration file defines {} keys", payload.len());
    Ok(Some(LoadedConfig { path, payload }))
}

/// Takes `entries` and `mode` out of `payload`.
///
/// A `null` value for either key counts as absent. Every other key is left
/// in `remaining` untouched, for `PartialOptions::from_payload`.
///
/// # Arguments
///
/// * `payload` - The parsed configuration object, consumed.
/// * `source` - The file the payload came from; named in errors.
///
/// # Returns
///
/// * `Result<SplitPayload>` - The side-channel values plus the remaining keys.
///
/// # Errors
///
/// - `ZiprsError::InvalidMode` if `mode` is neither `"add"` nor `"extract"`.
/// - `ZiprsError::ConfigFileMalformed` if `entries` is not a list of strings.
pub fn split_payload(mut payload: RawConfigPayload, source: &Path) -> Result<SplitPayload> {
    let entries = match payload.remove("entries") {
        None | Some(Value::Null) => None,
        Some(value) => Some(serde_json::from_value::<Vec<String>>(value).map_err(|e| {
            anyhow::Error::new(ZiprsError::ConfigFileMalformed {
                path: source.display().to_string(),
                reason: format!("\"entries\" must be a list of strings ({})", e),
            })
        })?),
    };

    let mode = match payload.remove("mode") {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value.parse::<Mode>()?),
        Some(other) => anyhow::bail!(ZiprsError::InvalidMode {
            value: other.to_string(),
        }),
    };

    debug!(
        "Configuration side-channel: mode={:?}, entries={:?}",
        mode, entries
    );
    Ok(SplitPayload {
        entries,
        mode,
        remaining: payload,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
