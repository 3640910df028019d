#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! These tests ensure that the CLI binary starts correctly and responds to
//! basic commands without crashing or reaching the network.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Runs the binary with an isolated config directory and no API key.
#[allow(deprecated)]
fn translate(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("translate").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("GOOGLE_TRANSLATE_API_KEY")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    translate(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Translate a text file"))
        .stdout(predicate::str::contains("--to"))
        .stdout(predicate::str::contains("--max-chars"))
        .stdout(predicate::str::contains("--rps"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    translate(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_file_argument_prints_usage() {
    let home = TempDir::new().unwrap();
    translate(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_nonexistent_file() {
    let home = TempDir::new().unwrap();
    translate(&home)
        .arg("/nonexistent/input.txt")
        .assert()
        .failure()
        .code(exitcode::NOINPUT)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_invalid_language_code() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("input.txt");
    fs::write(&input, "hello\n").unwrap();

    translate(&home)
        .args(["--to", "invalid_lang_xyz"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid language code"));
}

#[test]
fn test_missing_api_key_is_reported_before_output_is_created() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("input.txt");
    let output = home.path().join("out.txt");
    fs::write(&input, "hello\n").unwrap();

    translate(&home)
        .arg("--output")
        .arg(&output)
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GOOGLE_TRANSLATE_API_KEY"));

    assert!(!output.exists());
}

#[test]
fn test_languages_list() {
    let home = TempDir::new().unwrap();
    translate(&home)
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("zh-TW"))
        .stdout(predicate::str::contains("ja"));
}

#[test]
fn test_providers_list_without_config() {
    let home = TempDir::new().unwrap();
    translate(&home)
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("google"))
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn test_config_shows_effective_settings() {
    let home = TempDir::new().unwrap();
    translate(&home)
        .env("GOOGLE_TRANSLATE_API_KEY", "test-key")
        .args(["--max-chars", "7000", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7000"))
        .stdout(predicate::str::contains("zh-TW"))
        .stdout(predicate::str::contains("test-key").not());
}
