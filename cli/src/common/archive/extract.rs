//! # ziprs Zip Extractor (`common::archive::extract`)
//!
//! File: cli/src/common/archive/extract.rs
//!
//! ## Overview
//!
//! `ZipExtractor` is the `ArchiveExtractor` used by the CLI. Each entry is
//! the path of a zip archive. Members are written below `outputEntry`, or
//! streamed to stdout when no output directory is configured.
//!
//! Member names are sanitized with `enclosed_name`, so an archive cannot
//! write outside the output directory. Unsafe names are skipped.
//!
use super::{ArchiveExtractor, ExtractSummary, STDOUT_LABEL};
use crate::common::fs::io::{ensure_dir_exists, resolve_path};
use crate::core::error::{Result, ZiprsError};
use crate::core::options::Options;
use anyhow::Context;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::ZipArchive;

/// Zip-backed archive extractor.
#[derive(Debug)]
pub struct ZipExtractor {
    options: Options,
    cwd: PathBuf,
}

impl ZipExtractor {
    pub fn new(options: &Options, cwd: PathBuf) -> Self {
        Self {
            options: options.clone(),
            cwd,
        }
    }
}

impl ArchiveExtractor for ZipExtractor {
    async fn extract(&mut self, entries: &[String]) -> Result<ExtractSummary> {
        let entries = entries.to_vec();
        let options = self.options.clone();
        let cwd = self.cwd.clone();
        tokio::task::spawn_blocking(move || extract_archives(&entries, &options, &cwd))
            .await
            .context("Archive extraction task failed")?
    }
}

fn open_archive(raw: &str, cwd: &Path) -> Result<ZipArchive<File>> {
    let path = resolve_path(raw, cwd);
    let file = File::open(&path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => anyhow::Error::new(ZiprsError::EntryNotFound {
            entry: raw.to_string(),
        }),
        _ => anyhow::Error::new(e).context(format!("Failed to open archive {:?}", path)),
    })?;
    ZipArchive::new(file).map_err(|e| {
        anyhow::Error::new(ZiprsError::InvalidArchive {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    })
}

fn extract_archives(entries: &[String], options: &Options, cwd: &Path) -> Result<ExtractSummary> {
    let output_dir = options
        .output_entry
        .as_deref()
        .map(|raw| resolve_path(raw, cwd));
    if let Some(dir) = &output_dir {
        ensure_dir_exists(dir)?;
    }

    let mut extracted_files_count = 0;
    for raw in entries {
        let mut archive = open_archive(raw, cwd)?;
        info!("Extracting {} members from \"{}\"", archive.len(), raw);

        for index in 0..archive.len() {
            let mut member = archive
                .by_index(index)
                .with_context(|| format!("Failed to read member #{} of \"{}\"", index, raw))?;

            let Some(relative) = member.enclosed_name() else {
                warn!("Skipping unsafe member name \"{}\" in \"{}\"", member.name(), raw);
                continue;
            };

            let Some(dir) = &output_dir else {
                if member.is_file() {
                    let mut stdout = io::stdout().lock();
                    io::copy(&mut member, &mut stdout)
                        .and_then(|_| stdout.flush())
                        .context("Failed to write member to stdout")?;
                    extracted_files_count += 1;
                }
                continue;
            };

            let target = dir.join(relative);
            if member.is_dir() {
                ensure_dir_exists(&target)?;
                continue;
            }

            if let Ok(existing) = target.symlink_metadata() {
                if !options.force {
                    anyhow::bail!(ZiprsError::OutputExists {
                        path: target.display().to_string(),
                    });
                }
                if existing.is_dir() {
                    anyhow::bail!("Cannot replace directory {:?} with a file", target);
                }
                // Unlink first so an existing symlink is replaced, not written through.
                fs::remove_file(&target)
                    .with_context(|| format!("Failed to remove existing {:?}", target))?;
            }
            if let Some(parent) = target.parent() {
                ensure_dir_exists(parent)?;
            }

            let mut out = File::create(&target)
                .with_context(|| format!("Failed to create {:?}", target))?;
            io::copy(&mut member, &mut out)
                .with_context(|| format!("Failed to extract {:?}", target))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = member.unix_mode().map(|m| m & 0o777).filter(|m| *m != 0) {
                    fs::set_permissions(&target, fs::Permissions::from_mode(mode))
                        .with_context(|| format!("Failed to set permissions on {:?}", target))?;
                }
            }

            debug!("Extracted {:?}", target);
            extracted_files_count += 1;
        }
    }

    Ok(ExtractSummary {
        output_dir: output_dir
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| STDOUT_LABEL.to_string()),
        extracted_files_count,
    })
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_fixture(path: &Path, members: &[(&str, &str)]) -> Result<()> {
        let mut writer = ZipWriter::new(File::create(path)?);
        for (name, content) in members {
            if name.ends_with('/') {
                writer.add_directory(*name, SimpleFileOptions::default())?;
            } else {
                writer.start_file(*name, SimpleFileOptions::default())?;
                writer.write_all(content.as_bytes())?;
            }
        }
        writer.finish()?;
        Ok(())
    }

    fn options_with_output(output: &str) -> Options {
        Options {
            output_entry: Some(output.to_string()),
            ..Options::default()
        }
    }

    #[tokio::test]
    async fn test_extract_into_output_dir() -> Result<()> {
        let dir = tempdir()?;
        write_fixture(
            &dir.path().join("in.zip"),
            &[("docs/", ""), ("docs/a.txt", "alpha"), ("b.txt", "beta")],
        )?;

        let mut extractor = ZipExtractor::new(&options_with_output("out"), dir.path().to_path_buf());
        let summary = extractor.extract(&["in.zip".to_string()]).await?;

        assert_eq!(summary.extracted_files_count, 2);
        assert_eq!(summary.output_dir, dir.path().join("out").display().to_string());
        assert_eq!(fs::read_to_string(dir.path().join("out/docs/a.txt"))?, "alpha");
        assert_eq!(fs::read_to_string(dir.path().join("out/b.txt"))?, "beta");
        Ok(())
    }

    #[tokio::test]
    async fn test_existing_file_requires_force() -> Result<()> {
        let dir = tempdir()?;
        write_fixture(&dir.path().join("in.zip"), &[("a.txt", "new")])?;
        fs::create_dir(dir.path().join("out"))?;
        fs::write(dir.path().join("out/a.txt"), "old")?;

        let mut extractor = ZipExtractor::new(&options_with_output("out"), dir.path().to_path_buf());
        let err = extractor.extract(&["in.zip".to_string()]).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ZiprsError>(),
            Some(ZiprsError::OutputExists { .. })
        ));

        let options = Options {
            force: true,
            ..options_with_output("out")
        };
        let mut extractor = ZipExtractor::new(&options, dir.path().to_path_buf());
        extractor.extract(&["in.zip".to_string()]).await?;
        assert_eq!(fs::read_to_string(dir.path().join("out/a.txt"))?, "new");
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_force_replaces_symlink_instead_of_following_it() -> Result<()> {
        let dir = tempdir()?;
        write_fixture(&dir.path().join("in.zip"), &[("a.txt", "payload")])?;
        fs::create_dir(dir.path().join("out"))?;
        fs::write(dir.path().join("victim.txt"), "untouched")?;
        std::os::unix::fs::symlink(dir.path().join("victim.txt"), dir.path().join("out/a.txt"))?;

        let options = Options {
            force: true,
            ..options_with_output("out")
        };
        let mut extractor = ZipExtractor::new(&options, dir.path().to_path_buf());
        extractor.extract(&["in.zip".to_string()]).await?;

        assert_eq!(fs::read_to_string(dir.path().join("victim.txt"))?, "untouched");
        let written = dir.path().join("out/a.txt");
        assert!(!written.symlink_metadata()?.file_type().is_symlink());
        assert_eq!(fs::read_to_string(&written)?, "payload");
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_and_invalid_archives() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("broken.zip"), "definitely not a zip")?;
        let mut extractor = ZipExtractor::new(&options_with_output("out"), dir.path().to_path_buf());

        let err = extractor.extract(&["nope.zip".to_string()]).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ZiprsError>(),
            Some(&ZiprsError::EntryNotFound {
                entry: "nope.zip".into()
            })
        );

        let err = extractor.extract(&["broken.zip".to_string()]).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ZiprsError>(),
            Some(ZiprsError::InvalidArchive { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_unsafe_member_names_are_skipped() -> Result<()> {
        let dir = tempdir()?;
        write_fixture(
            &dir.path().join("evil.zip"),
            &[("../escape.txt", "x"), ("safe.txt", "y")],
        )?;

        let mut extractor = ZipExtractor::new(&options_with_output("out"), dir.path().to_path_buf());
        let summary = extractor.extract(&["evil.zip".to_string()]).await?;

        assert_eq!(summary.extracted_files_count, 1);
        assert!(!dir.path().join("escape.txt").exists());
        assert!(dir.path().join("out/safe.txt").exists());
        Ok(())
    }
}
