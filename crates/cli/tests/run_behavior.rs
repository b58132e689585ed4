// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Running the pad against scripted frame behavior.

mod common;

use common::{webpad, write_temp};
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Clean runs
// =============================================================================

#[test]
fn test_run_clean_pad_exits_zero_with_no_output() {
    let dir = TempDir::new().unwrap();

    webpad(&dir)
        .args(["set", "html", "<p>hello</p>"])
        .assert()
        .success();

    webpad(&dir)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_run_saves_the_pad_first() {
    let dir = TempDir::new().unwrap();

    webpad(&dir).arg("run").assert().success();

    webpad(&dir)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved: never").not());
}

#[test]
fn test_run_ignores_frame_chatter() {
    let dir = TempDir::new().unwrap();
    let behavior = write_temp(
        r#"
        [[chatter]]
        type = "ready"

        [[chatter]]
        type = "log"
        text = "boot"
        "#,
    );

    webpad(&dir)
        .args(["run", "--behavior"])
        .arg(behavior.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// =============================================================================
// Script errors
// =============================================================================

#[test]
fn test_run_native_error_reports_and_exits_two() {
    let dir = TempDir::new().unwrap();
    let behavior = write_temp(
        r#"
        [native_error]
        message = "Boom"
        line = 3
        "#,
    );

    webpad(&dir)
        .args(["set", "javascript", "throw new Error('Boom')"])
        .assert()
        .success();

    webpad(&dir)
        .args(["run", "--behavior"])
        .arg(behavior.path())
        .assert()
        .code(2)
        .stdout("Javascript error on line 3.\nBoom\n");
}

#[test]
fn test_run_secondary_error_takes_line_from_trace() {
    let dir = TempDir::new().unwrap();
    let behavior = write_temp(
        r#"
        [secondary_error]
        message = "NameError: x"
        trace = '''
        Traceback (most recent call last):
          File "<string>", line 4, in <module>
        '''
        "#,
    );

    webpad(&dir)
        .args(["run", "--behavior"])
        .arg(behavior.path())
        .assert()
        .code(2)
        .stdout("Python error on line 4.\nNameError: x\n");
}

#[test]
fn test_run_error_without_line_prints_unknown() {
    let dir = TempDir::new().unwrap();
    let behavior = write_temp(
        r#"
        [native_error]
        message = "Boom"
        "#,
    );

    webpad(&dir)
        .args(["run", "--behavior"])
        .arg(behavior.path())
        .assert()
        .code(2)
        .stdout("Javascript error on unknown line.\nBoom\n");
}

#[test]
fn test_run_json_format_emits_report_objects() {
    let dir = TempDir::new().unwrap();
    let behavior = write_temp(
        r#"
        [native_error]
        message = "Boom"
        line = 3
        "#,
    );

    let assert = webpad(&dir)
        .args(["run", "--format", "json", "--behavior"])
        .arg(behavior.path())
        .assert()
        .code(2);
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let report: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();

    assert_eq!(
        report,
        serde_json::json!({
            "type": "error",
            "source": "native-script",
            "line": 3,
            "message": "Boom",
        })
    );
}

#[test]
fn test_run_reports_both_scripts() {
    let dir = TempDir::new().unwrap();
    let behavior = write_temp(
        r#"
        [native_error]
        message = "js side"

        [secondary_error]
        message = "python side"
        "#,
    );

    webpad(&dir)
        .args(["run", "--behavior"])
        .arg(behavior.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("js side"))
        .stdout(predicate::str::contains("python side"));
}

// =============================================================================
// Frame failures
// =============================================================================

#[test]
fn test_run_create_failure_exits_one() {
    let dir = TempDir::new().unwrap();
    let behavior = write_temp(r#"fail_create = "no display""#);

    webpad(&dir)
        .args(["run", "--behavior"])
        .arg(behavior.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to create frame: no display"));
}

#[test]
fn test_run_ready_timeout_exits_one() {
    let dir = TempDir::new().unwrap();
    let behavior = write_temp("never_ready = true");

    webpad(&dir)
        .args([
            "run",
            "--poll-interval-ms",
            "5",
            "--ready-timeout-ms",
            "40",
            "--behavior",
        ])
        .arg(behavior.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not ready after 40 ms"));
}

#[test]
fn test_run_missing_behavior_file_errors() {
    let dir = TempDir::new().unwrap();

    webpad(&dir)
        .args(["run", "--behavior", "/nonexistent/behavior.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read"));
}
