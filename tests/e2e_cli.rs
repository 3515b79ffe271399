//! CLI end-to-end tests
//!
//! Tests for the storyteller command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the storyteller binary
#[allow(deprecated)]
fn storyteller_cmd() -> Command {
    Command::cargo_bin("storyteller").unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = storyteller_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = storyteller_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("storyteller"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = storyteller_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("storyteller"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = storyteller_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_start_help() {
    let mut cmd = storyteller_cmd();
    cmd.args(["start", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Start the HTTP server"));
}

#[test]
fn test_cli_validate_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("config.toml");

    fs::write(
        &config_file,
        r#"
[server]
host = "127.0.0.1"
port = 8081

[uploads]
allowed_extensions = ["png"]
"#,
    )
    .unwrap();

    let mut cmd = storyteller_cmd();
    cmd.args(["validate", config_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Allowed image types: png"));
}

#[test]
fn test_cli_validate_invalid_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("config.toml");
    fs::write(&config_file, "[server]\nport = 0\n").unwrap();

    let mut cmd = storyteller_cmd();
    cmd.args(["--config", config_file.to_str().unwrap(), "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("port"));
}

#[test]
fn test_cli_validate_missing_file() {
    let mut cmd = storyteller_cmd();
    cmd.args(["validate", "/nonexistent/storyteller.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_cli_start_invalid_port() {
    let mut cmd = storyteller_cmd();
    cmd.args(["start", "--port", "99999"]).assert().failure();
}
