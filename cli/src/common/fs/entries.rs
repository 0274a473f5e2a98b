//! # ziprs Entry Resolution
//!
//! File: cli/src/common/fs/entries.rs
//!
//! ## Overview
//!
//! Turns the raw entry strings given on the command line or in the
//! configuration file into filesystem paths, and decides which of those
//! paths end up in an archive and under which name.
//!
//! - **`expand_entry`**: A raw entry is either a glob pattern (expanded with the `glob` crate)
//!   or a plain path that must exist.
//! - **`IgnoreSet`**: The compiled `ignoreEntries` patterns.
//! - **`archive_path`**: The `/`-separated member name used inside the archive.
//!
use crate::common::fs::io::resolve_path;
use crate::core::error::{Result, ZiprsError};
use anyhow::Context;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Returns true if `raw` contains glob metacharacters.
pub fn is_glob(raw: &str) -> bool {
    raw.chars().any(|c| matches!(c, '*' | '?' | '['))
}

/// Expands a raw entry into the paths it names.
///
/// Glob entries are matched relative to `cwd` and may legitimately match
/// nothing (a warning is logged). Plain entries must exist, otherwise
/// `ZiprsError::EntryNotFound` is returned. Dangling symlinks count as existing.
pub fn expand_entry(raw: &str, cwd: &Path) -> Result<Vec<PathBuf>> {
    let resolved = resolve_path(raw, cwd);

    if !is_glob(raw) {
        if resolved.symlink_metadata().is_err() {
            anyhow::bail!(ZiprsError::EntryNotFound {
                entry: raw.to_string(),
            });
        }
        return Ok(vec![resolved]);
    }

    let pattern = resolved.to_string_lossy();
    let mut paths = Vec::new();
    for matched in glob::glob(&pattern)
        .with_context(|| format!("Invalid glob pattern in entry \"{}\"", raw))?
    {
        paths.push(matched.with_context(|| format!("Failed to expand entry \"{}\"", raw))?);
    }

    if paths.is_empty() {
        warn!("Entry pattern \"{}\" did not match any files.", raw);
    } else {
        debug!("Entry pattern \"{}\" matched {} path(s)", raw, paths.len());
    }
    Ok(paths)
}

/// Computes the member name for `path` inside the archive.
///
/// Paths below `cwd` keep their location relative to it. Paths outside of it
/// are named relative to the parent of the entry `root` they were found under,
/// so adding `/tmp/data` stores `data/...`.
pub fn archive_path(path: &Path, root: &Path, cwd: &Path) -> String {
    let relative = pathdiff::diff_paths(path, cwd)
        .filter(|rel| !rel.components().any(|c| matches!(c, Component::ParentDir)));

    let relative = match relative {
        Some(rel) => rel,
        None => {
            let anchor = root.parent().unwrap_or(root);
            pathdiff::diff_paths(path, anchor).unwrap_or_else(|| path.to_path_buf())
        }
    };

    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// The compiled set of `ignoreEntries` glob patterns.
#[derive(Debug, Default, Clone)]
pub struct IgnoreSet {
    patterns: Vec<glob::Pattern>,
}

impl IgnoreSet {
    /// Compiles `raw_patterns`. Patterns that fail to compile are skipped with a warning.
    pub fn new(raw_patterns: &[String]) -> Self {
        let patterns = raw_patterns
            .iter()
            .filter_map(|raw| match glob::Pattern::new(raw) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Ignoring invalid ignore pattern \"{}\": {}", raw, e);
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    /// Returns true if the member name, or its last segment, matches any pattern.
    pub fn is_ignored(&self, archive_path: &str) -> bool {
        let file_name = archive_path.rsplit('/').next().unwrap_or(archive_path);
        self.patterns
            .iter()
            .any(|pattern| pattern.matches(archive_path) || pattern.matches(file_name))
    }
}
