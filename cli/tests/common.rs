//! # ziprs CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`add.rs`, `extract.rs`,
//! `file_mode.rs`, `main_tests.rs`). Each test runs the compiled `ziprs`
//! binary inside its own temporary directory, so the default configuration
//! file lookup never sees the repository's working directory.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// # Get ziprs Command (`ziprs_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `ziprs` binary.
///
/// ## Panics
/// Panics if the `ziprs` binary cannot be found via `Command::cargo_bin`.
pub fn ziprs_cmd() -> Command {
    Command::cargo_bin("ziprs").expect("Failed to find ziprs binary for testing")
}

/// `ziprs_cmd` running inside `dir`, with `RUST_LOG` cleared.
pub fn ziprs_in(dir: &Path) -> Command {
    let mut cmd = ziprs_cmd();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

/// Writes `.ziprsrc.json` into `dir`.
pub fn write_config(dir: &Path, content: &str) {
    fs::write(dir.join(".ziprsrc.json"), content).expect("Failed to write config file");
}

/// Writes a zip archive with the given `(name, content)` members.
pub fn write_zip(path: &Path, members: &[(&str, &str)]) {
    let mut writer = ZipWriter::new(File::create(path).expect("Failed to create zip"));
    for (name, content) in members {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("Failed to start zip member");
        writer
            .write_all(content.as_bytes())
            .expect("Failed to write zip member");
    }
    writer.finish().expect("Failed to finish zip");
}

/// Sorted member names of the zip archive at `path`.
pub fn zip_members(path: &Path) -> Vec<String> {
    let archive = ZipArchive::new(File::open(path).expect("Failed to open zip"))
        .expect("Failed to read zip");
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    names
}

/// Content of one member of the zip archive at `path`.
pub fn zip_member_content(path: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).expect("Failed to open zip"))
        .expect("Failed to read zip");
    let mut content = String::new();
    archive
        .by_name(name)
        .expect("Member not found")
        .read_to_string(&mut content)
        .expect("Failed to read member");
    content
}

/// Stdout of a finished command as lines.
pub fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect()
}
