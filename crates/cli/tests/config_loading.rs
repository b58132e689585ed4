// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Config file loading and precedence through the webpad binary.

mod common;

use common::{webpad, write_temp};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_config_file_sets_name() {
    let dir = TempDir::new().unwrap();
    let config = write_temp(r#"name = "from-config""#);

    webpad(&dir)
        .args(["--config"])
        .arg(config.path())
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: from-config"));
}

#[test]
fn test_name_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let config = write_temp(r#"name = "from-config""#);

    webpad(&dir)
        .args(["--config"])
        .arg(config.path())
        .args(["--name", "from-flag", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: from-flag"));
}

#[test]
fn test_name_env_var() {
    let dir = TempDir::new().unwrap();

    webpad(&dir)
        .env("WEBPAD_NAME", "from-env")
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: from-env"));
}

#[test]
fn test_json_config_with_comments() {
    let dir = TempDir::new().unwrap();
    let config = write_temp(
        r#"{
            // JSON5 comments are fine in .json configs
            name: "json-pad",
        }"#,
    );

    webpad(&dir)
        .args(["--config"])
        .arg(config.path())
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: json-pad"));
}

#[test]
fn test_unknown_config_key_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write_temp(r#"poll_interval = 10"#);

    webpad(&dir)
        .args(["--config"])
        .arg(config.path())
        .arg("info")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn test_zero_poll_interval_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write_temp("poll_interval_ms = 0");

    webpad(&dir)
        .args(["--config"])
        .arg(config.path())
        .arg("info")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("poll_interval_ms must be at least 1"));
}

#[test]
fn test_missing_config_file_errors() {
    let dir = TempDir::new().unwrap();

    webpad(&dir)
        .args(["--config", "/nonexistent/webpad.toml", "info"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_bootstrap_path_reaches_standalone_export() {
    let dir = TempDir::new().unwrap();
    let bootstrap = write_temp("// custom interpreter bundle");
    let config_text = format!(
        "bootstrap_path = {:?}",
        bootstrap.path().to_str().unwrap()
    );
    let config = write_temp(&config_text);
    let out = dir.path().join("pad.html");

    webpad(&dir)
        .args(["--config"])
        .arg(config.path())
        .args(["export", "standalone", "-o"])
        .arg(&out)
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("custom interpreter bundle"), "{content}");
}
