// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for webpad CLI integration tests.

#![allow(dead_code)]
#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

use std::io::Write;

use assert_cmd::Command;
use tempfile::{NamedTempFile, TempDir};

/// Create a temporary config or behavior file.
/// Detects JSON vs TOML content and uses the appropriate extension.
pub fn write_temp(content: &str) -> NamedTempFile {
    let is_json = content.trim().starts_with('{');

    let mut file = if is_json {
        tempfile::Builder::new().suffix(".json").tempfile().unwrap()
    } else {
        tempfile::Builder::new().suffix(".toml").tempfile().unwrap()
    };

    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Webpad command pointed at a storage file inside the given directory.
pub fn webpad(dir: &TempDir) -> Command {
    let mut cmd = webpad_bare();
    cmd.arg("--storage").arg(dir.path().join("storage.json"));
    cmd
}

/// Webpad command with no arguments applied.
pub fn webpad_bare() -> Command {
    Command::cargo_bin("webpad").unwrap()
}
