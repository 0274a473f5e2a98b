//! # ziprs Archive Collaborators (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! This module defines the boundary between the orchestrator and the
//! engines that actually build and extract archives. The orchestrator only
//! knows the two traits below; the zip-backed implementations live in the
//! submodules.
//!
//! ## Architecture
//!
//! - **`ArchiveBuilder`**: Collects entries with `add` and writes the archive with `save`.
//! - **`ArchiveExtractor`**: Extracts a list of archives in one call.
//! - **`build`**: `ZipBuilder`, the `zip`-crate implementation of `ArchiveBuilder`.
//! - **`extract`**: `ZipExtractor`, the `zip`-crate implementation of `ArchiveExtractor`.
//!
//! Both implementations receive the resolved `Options` at construction time
//! and honor the fields relevant to them.
//!
//! ## Usage
//!
//! ```rust
//! let mut builder = ZipBuilder::new(&options, cwd.clone());
//! let summary = builder.add(&["src".to_string()])?.save().await?;
//! println!("{} files -> {}", summary.compressed_files_count, summary.output_file);
//! ```
//!
use crate::core::error::Result;
use std::path::PathBuf;

pub mod build;
pub mod extract;

pub use build::ZipBuilder;
pub use extract::ZipExtractor;

/// Label reported as output location when archive data goes to stdout.
pub const STDOUT_LABEL: &str = "stdout";

/// A filesystem path paired with its member name inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub resolved_path: PathBuf,
    pub zip_path: String,
}

/// Result of writing an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub output_file: String,
    pub compressed_files_count: usize,
}

/// Result of extracting one or more archives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractSummary {
    pub output_dir: String,
    pub extracted_files_count: usize,
}

/// Builds an archive from filesystem entries.
#[allow(async_fn_in_trait)]
pub trait ArchiveBuilder {
    /// Queues `entries` (paths or glob patterns) and returns the builder for chaining.
    fn add(&mut self, entries: &[String]) -> Result<&mut Self>;

    /// Writes the archive containing everything added so far.
    async fn save(&mut self) -> Result<BuildSummary>;
}

/// Extracts archives.
#[allow(async_fn_in_trait)]
pub trait ArchiveExtractor {
    async fn extract(&mut self, entries: &[String]) -> Result<ExtractSummary>;
}
