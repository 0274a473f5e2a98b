//! # ziprs Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the small filesystem helpers shared by the
//! configuration loader and the archive collaborators:
//!
//! - **`resolve_path`**: Expands a leading `~`, anchors relative paths at a base directory
//!   and folds `.`/`..` components, so every resolved path is absolute and clean.
//! - **`normalize_path`**: The lexical clean-up used by `resolve_path`.
//! - **`ensure_dir_exists`**: Creates a directory (and parents) if missing, and rejects non-directories.
//! - **`read_file_bytes`**: Reads a whole file as raw bytes. Decoding is left to the caller,
//!   so "could not read" and "could not decode" stay separate failures.
//! - **`write_bytes_to_file`**: Writes bytes to a file, refusing to overwrite unless forced.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! let cwd = std::env::current_dir()?;
//! let output = io::resolve_path("~/archives/../out.zip", &cwd); // -> $HOME/out.zip
//! io::write_bytes_to_file(&output, &archive_bytes, false)?;
//! ```
//!
use crate::core::error::{Result, ZiprsError}; // Crate-wide Result and error enum
use anyhow::Context; // Adds the path to I/O errors
use std::fs; // Standard filesystem module
use std::path::{Component, Path, PathBuf}; // Path types and components
use tracing::debug; // Logging utilities

/// Resolves a user-supplied path against `base`.
///
/// A leading `~` is expanded to the home directory. Relative results are
/// joined onto `base`, then `.` and `..` are folded lexically. The file
/// system is not consulted, so the path does not need to exist.
///
/// # Arguments
///
/// * `raw` - The path as written by the user or the configuration file.
/// * `base` - Absolute directory that relative paths are anchored at.
///
/// # Returns
///
/// * `PathBuf` - The absolute, normalized path.
pub fn resolve_path(raw: &str, base: &Path) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(raw).into_owned());
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };
    normalize_path(&joined)
}

/// Folds `.` and `..` components of `path` without touching the file system.
///
/// `..` at the root stays at the root. Symlinks are not resolved, so
/// `link/..` becomes the directory holding `link`.
///
/// # Arguments
///
/// * `path` - Any path, usually already absolute.
///
/// # Returns
///
/// * `PathBuf` - The path without `.` or `..` components (unless a relative
///   path starts by leaving its base).
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            // Keep the root (and a Windows prefix) as the anchor.
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // Pop a normal component; never climb above the root.
                let popped = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                ) && normalized.pop();
                if !popped && !normalized.has_root() {
                    normalized.push("..");
                }
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

/// Makes sure `path` is a directory, creating it and its parents if needed.
///
/// # Arguments
///
/// * `path` - The directory that must exist afterwards.
///
/// # Errors
///
/// Fails when something other than a directory already sits at `path`, or
/// when creating the directory fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => anyhow::bail!("{:?} exists and is not a directory", path),
        Err(_) => {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory {:?}", path))?;
            debug!("Created directory {:?}", path);
            Ok(())
        }
    }
}

/// Reads the entire content of a file as bytes.
///
/// Only I/O failures (missing file, permissions, directory) are reported
/// here. Content that is not valid UTF-8 is still returned.
///
/// # Arguments
///
/// * `path` - The file to read.
///
/// # Returns
///
/// * `Result<Vec<u8>>` - The raw file content.
pub fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes `content` to `path`, creating parent directories as needed.
///
/// An existing file at `path` is only replaced when `force` is set.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The file exists and `force` is false (`ZiprsError::OutputExists`).
/// - The parent directory cannot be created.
/// - Writing to the file fails.
pub fn write_bytes_to_file(path: &Path, content: &[u8], force: bool) -> Result<()> {
    if let Ok(existing) = path.symlink_metadata() {
        if !force {
            anyhow::bail!(ZiprsError::OutputExists {
                path: path.display().to_string(),
            });
        }
        // Replace links instead of writing through them.
        if existing.file_type().is_symlink() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove existing link {:?}", path))?;
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }

    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}
