//! # ziprs Zip Builder (`common::archive::build`)
//!
//! File: cli/src/common/archive/build.rs
//!
//! ## Overview
//!
//! `ZipBuilder` is the `ArchiveBuilder` used by the CLI. It resolves entry
//! strings into files, directories and symlinks, then writes them into a
//! zip archive using the `zip` crate.
//!
//! ## Architecture
//!
//! - `add` runs synchronously: every raw entry goes through `expand_entry`, directories
//!   are walked with `walkdir`, and `ignoreEntries` prunes whole subtrees.
//! - `save` moves the collected entries onto `tokio::task::spawn_blocking`, encodes the
//!   archive in memory and writes it to `outputEntry` or stdout.
//!
//! Options honored: `compression_level` (0 stores, 1-9 deflates),
//! `dereference_links`, `force`, `ignore_entries` and `output_entry`.
//!
use super::{ArchiveBuilder, BuildSummary, Entry, STDOUT_LABEL};
use crate::common::fs::entries::{archive_path, expand_entry, IgnoreSet};
use crate::common::fs::io::{resolve_path, write_bytes_to_file};
use crate::core::error::Result;
use crate::core::options::Options;
use anyhow::Context;
use std::fs::{self, File};
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Zip-backed archive builder.
#[derive(Debug)]
pub struct ZipBuilder {
    options: Options,
    cwd: PathBuf,
    ignore: IgnoreSet,
    entries: Vec<Entry>,
}

impl ZipBuilder {
    /// Creates a builder for the resolved `options`. Relative entries and the
    /// output path are resolved against `cwd`.
    pub fn new(options: &Options, cwd: PathBuf) -> Self {
        Self {
            ignore: IgnoreSet::new(&options.ignore_entries),
            options: options.clone(),
            cwd,
            entries: Vec::new(),
        }
    }

    /// Entries queued so far, in insertion order.
    #[cfg(test)]
    fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Walks `root` and returns every non-ignored path below it (including itself).
    fn collect_entries(&self, root: &Path) -> Result<Vec<Entry>> {
        let root_is_link = root
            .symlink_metadata()
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);

        // A link is stored as a link unless dereferencing, so it is never descended into.
        if root_is_link && !self.options.dereference_links {
            let zip_path = archive_path(root, root, &self.cwd);
            if zip_path.is_empty() || self.ignore.is_ignored(&zip_path) {
                return Ok(Vec::new());
            }
            return Ok(vec![Entry {
                resolved_path: root.to_path_buf(),
                zip_path,
            }]);
        }

        let walker = WalkDir::new(root)
            .follow_links(self.options.dereference_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|item| {
                let name = archive_path(item.path(), root, &self.cwd);
                let ignored = !name.is_empty() && self.ignore.is_ignored(&name);
                if ignored {
                    debug!("Ignoring entry \"{}\"", name);
                }
                !ignored
            });

        let mut collected = Vec::new();
        for item in walker {
            let item = item.with_context(|| format!("Failed to read entry {:?}", root))?;
            let zip_path = archive_path(item.path(), root, &self.cwd);
            if zip_path.is_empty() {
                continue;
            }
            collected.push(Entry {
                resolved_path: item.path().to_path_buf(),
                zip_path,
            });
        }
        Ok(collected)
    }
}

impl ArchiveBuilder for ZipBuilder {
    fn add(&mut self, entries: &[String]) -> Result<&mut Self> {
        for raw in entries {
            for root in expand_entry(raw, &self.cwd)? {
                for entry in self.collect_entries(&root)? {
                    if self.entries.iter().any(|e| e.zip_path == entry.zip_path) {
                        debug!("Entry \"{}\" already queued", entry.zip_path);
                        continue;
                    }
                    debug!("Queued {:?} as \"{}\"", entry.resolved_path, entry.zip_path);
                    self.entries.push(entry);
                }
            }
        }
        info!("{} entries queued for compression", self.entries.len());
        Ok(self)
    }

    async fn save(&mut self) -> Result<BuildSummary> {
        let entries = self.entries.clone();
        let options = self.options.clone();
        let cwd = self.cwd.clone();
        tokio::task::spawn_blocking(move || write_archive(&entries, &options, &cwd))
            .await
            .context("Archive build task failed")?
    }
}

/// Encodes the archive and writes it to the configured destination.
fn write_archive(entries: &[Entry], options: &Options, cwd: &Path) -> Result<BuildSummary> {
    let output_path = options
        .output_entry
        .as_deref()
        .map(|raw| resolve_path(raw, cwd));

    // Never pack a previous version of the output into itself.
    let entries: Vec<&Entry> = entries
        .iter()
        .filter(|e| Some(&e.resolved_path) != output_path.as_ref())
        .collect();

    info!("Compressing {} entries...", entries.len());
    let (bytes, compressed_files_count) =
        encode_archive(&entries, options.compression_level, options.dereference_links)?;

    let output_file = match output_path {
        Some(path) => {
            write_bytes_to_file(&path, &bytes, options.force)?;
            info!("Wrote archive {:?} ({} bytes)", path, bytes.len());
            path.display().to_string()
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|_| stdout.flush())
                .context("Failed to write archive to stdout")?;
            STDOUT_LABEL.to_string()
        }
    };

    Ok(BuildSummary {
        output_file,
        compressed_files_count,
    })
}

fn file_options(level: u32) -> SimpleFileOptions {
    if level == 0 {
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
    } else {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level)))
    }
}

/// Writes `entries` into an in-memory zip. Returns the bytes and the number
/// of non-directory members written.
fn encode_archive(entries: &[&Entry], level: u32, dereference: bool) -> Result<(Vec<u8>, usize)> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let base_options = file_options(level);
    let mut count = 0;

    for entry in entries {
        let path = &entry.resolved_path;
        let metadata = if dereference {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        }
        .with_context(|| format!("Failed to read metadata of {:?}", path))?;

        #[cfg(unix)]
        let options = {
            use std::os::unix::fs::PermissionsExt;
            base_options.unix_permissions(metadata.permissions().mode() & 0o7777)
        };
        #[cfg(not(unix))]
        let options = base_options;

        if metadata.file_type().is_symlink() {
            let target = fs::read_link(path)
                .with_context(|| format!("Failed to read link {:?}", path))?
                .to_string_lossy()
                .into_owned();
            writer
                .add_symlink(entry.zip_path.as_str(), target.as_str(), options)
                .with_context(|| format!("Failed to add link \"{}\"", entry.zip_path))?;
            count += 1;
        } else if metadata.is_dir() {
            writer
                .add_directory(entry.zip_path.as_str(), options)
                .with_context(|| format!("Failed to add directory \"{}\"", entry.zip_path))?;
        } else {
            writer
                .start_file(entry.zip_path.as_str(), options)
                .with_context(|| format!("Failed to add file \"{}\"", entry.zip_path))?;
            let mut file =
                File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
            io::copy(&mut file, &mut writer)
                .with_context(|| format!("Failed to compress {:?}", path))?;
            count += 1;
        }
    }

    let cursor = writer.finish().context("Failed to finalize zip archive")?;
    Ok((cursor.into_inner(), count))
}
