//! # ziprs Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the core and the commands:
//!
//! - **`archive`**: The collaborator traits and their zip-backed implementations.
//! - **`fs`**: Path resolution, file I/O and entry expansion.
//!

/// Archive collaborators (`ArchiveBuilder`, `ArchiveExtractor`, zip implementations).
pub mod archive;
/// Filesystem helpers (I/O, entry expansion).
pub mod fs;
