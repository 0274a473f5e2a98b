//! # ziprs Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! - **`io`**: Resolving user paths, ensuring directories exist, reading and writing files.
//! - **`entries`**: Expanding entry globs, ignore patterns and archive member names.
//!
//! Import from the specific submodule, e.g. `crate::common::fs::io::resolve_path`.
//!

/// Expansion of raw entries into paths and archive member names.
pub mod entries;
/// Basic file I/O (`resolve_path`, `ensure_dir_exists`, `write_bytes_to_file`).
pub mod io;
