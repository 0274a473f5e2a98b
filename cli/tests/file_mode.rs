//! # ziprs CLI File Mode Integration Tests
//!
//! File: cli/tests/file_mode.rs
//!
//! ## Overview
//!
//! Integration tests for running `ziprs` without a subcommand, where the
//! configuration file's `mode` and `entries` decide what happens.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// # Test File Mode Add (`test_file_mode_add_end_to_end`)
///
/// `{"mode":"add","entries":["a.txt"],"outputEntry":"out.zip"}` builds the
/// archive and prints exactly one line with the count and the output file.
#[test]
fn test_file_mode_add_end_to_end() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "alpha").unwrap();
    write_config(
        dir.path(),
        r#"{"mode":"add","entries":["a.txt"],"outputEntry":"out.zip"}"#,
    );

    let assert = ziprs_in(dir.path()).assert().success();

    let lines = stdout_lines(assert.get_output());
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Done compressing 1 files"));
    assert!(lines[0].contains("out.zip"));
    assert_eq!(zip_members(&dir.path().join("out.zip")), vec!["a.txt"]);
}

#[test]
fn test_file_mode_extract() {
    let dir = tempdir().unwrap();
    write_zip(&dir.path().join("in.zip"), &[("x.txt", "x")]);
    write_config(
        dir.path(),
        r#"{ "mode": "extract", "entries": ["in.zip"], "outputEntry": "out" }"#,
    );

    ziprs_in(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Done extracting 1 files"));
    assert!(dir.path().join("out/x.txt").exists());
}

#[test]
fn test_explicit_config_path() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("conf")).unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::write(
        dir.path().join("conf/zip.json"),
        r#"{ "mode": "add", "entries": ["a.txt"], "outputEntry": "out.zip", "quiet": true }"#,
    )
    .unwrap();

    ziprs_in(dir.path())
        .args(["-c", "conf/zip.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(dir.path().join("out.zip").exists());
}

/// Command-line flags override the configuration file key by key.
#[test]
fn test_flags_override_configuration() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    write_config(
        dir.path(),
        r#"{ "mode": "add", "entries": ["a.txt"], "outputEntry": "file.zip", "compressionLevel": 9 }"#,
    );

    ziprs_in(dir.path())
        .args(["-o", "flag.zip", "-l", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flag.zip"));
    assert!(dir.path().join("flag.zip").exists());
    assert!(!dir.path().join("file.zip").exists());
}

#[test]
fn test_file_mode_without_config_fails() {
    let dir = tempdir().unwrap();
    ziprs_in(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No mode in configuration file defined."));
}

#[test]
fn test_file_mode_without_entries_fails() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), r#"{ "mode": "add", "outputEntry": "out.zip" }"#);
    ziprs_in(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entries provided."));
}

#[test]
fn test_invalid_mode_fails() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), r#"{ "mode": "bogus", "entries": ["a.txt"] }"#);
    ziprs_in(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid mode \"bogus\""));
}

#[test]
fn test_explicit_missing_config_fails() {
    let dir = tempdir().unwrap();
    ziprs_in(dir.path())
        .args(["-c", "explicit/missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Can't read configuration file"));
}

#[test]
fn test_malformed_config_fails() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), "{ this is not json");
    ziprs_in(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed JSON configuration file"));
}

/// `--noconfig` skips a present default file entirely.
#[test]
fn test_noconfig_ignores_default_file() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), r#"{ "mode": "add", "entries": ["a.txt"] }"#);
    ziprs_in(dir.path())
        .arg("--noconfig")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No mode in configuration file defined."));
}

/// A default file that cannot be decoded stops the run instead of being skipped.
#[test]
fn test_invalid_utf8_default_config_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::write(dir.path().join(".ziprsrc.json"), b"{\"mode\": \"add\xff\"}").unwrap();

    ziprs_in(dir.path())
        .args(["-o", "out.zip", "add", "a.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed JSON configuration file"));
    assert!(!dir.path().join("out.zip").exists());
}
