//! # ziprs Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout ziprs. Every fatal
//! condition the orchestrator or its archive collaborators can detect has a
//! dedicated variant with a message naming the offending path or field.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `ZiprsError`: A custom error enum using `thiserror` for the specific failure states
//! - `Result<T>`: A type alias for `anyhow::Result<T>` so I/O failures can carry context
//!
//! The error types cover these domains:
//! - Configuration file access and parsing
//! - Mode and entry resolution
//! - Archive output and input
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! anyhow::bail!(ZiprsError::NoEntriesToAdd);
//!
//! // Pattern matching on error types
//! match result {
//!     Err(e) if matches!(e.downcast_ref::<ZiprsError>(), Some(ZiprsError::NoModeDefined)) => {
//!         println!("Nothing to run.");
//!     }
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the ziprs application.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ZiprsError {
    /// An explicitly requested configuration file could not be read.
    #[error("Can't read configuration file \"{path}\".")]
    ConfigFileNotAccessible { path: String },

    /// The configuration file was read but does not hold a valid payload.
    #[error("Malformed JSON configuration file \"{path}\": {reason}")]
    ConfigFileMalformed { path: String, reason: String },

    #[error("Invalid mode \"{value}\" in configuration file (expected \"add\" or \"extract\").")]
    InvalidMode { value: String },

    #[error("No mode in configuration file defined.")]
    NoModeDefined,

    #[error("No entries provided.")]
    NoEntriesProvided,

    #[error("No entries to add.")]
    NoEntriesToAdd,

    #[error("No entries to extract.")]
    NoEntriesToExtract,

    /// Refusing to overwrite an existing file without `--force`.
    #[error("File \"{path}\" already exists.")]
    OutputExists { path: String },

    #[error("File \"{entry}\" not found.")]
    EntryNotFound { entry: String },

    #[error("Invalid zip archive \"{path}\": {reason}")]
    InvalidArchive { path: String, reason: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
