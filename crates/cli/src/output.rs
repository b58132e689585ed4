// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic output helpers for consistent error/warning formatting,
//! plus the user-facing rendering of relayed error reports.
//!
//! Provides ANSI color support with automatic terminal detection.

use crate::sandbox::{ErrorReport, ScriptKind};
use std::io::{self, IsTerminal, Write};

/// Process exit codes
pub mod exit_codes {
    /// Successful execution
    pub const SUCCESS: i32 = 0;
    /// Operational error (storage, config, frame)
    pub const ERROR: i32 = 1;
    /// The run itself worked, but a user script raised
    pub const SCRIPT_ERROR: i32 = 2;
}

/// Print an error message to stderr.
///
/// Displays in red when stderr is a terminal, plain text otherwise.
pub fn print_error(msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_error(&mut io::stderr(), msg, is_tty);
}

/// Write an error message to a writer with explicit terminal flag.
fn write_error<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    if is_terminal {
        let _ = writeln!(writer, "\x1b[31mError: {}\x1b[0m", msg);
    } else {
        let _ = writeln!(writer, "Error: {}", msg);
    }
}

/// Print a warning message to stderr.
///
/// Displays in yellow when stderr is a terminal, plain text otherwise.
pub fn print_warning(msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_warning(&mut io::stderr(), msg, is_tty);
}

/// Write a warning message to a writer with explicit terminal flag.
fn write_warning<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    if is_terminal {
        let _ = writeln!(writer, "\x1b[33mWarning: {}\x1b[0m", msg);
    } else {
        let _ = writeln!(writer, "Warning: {}", msg);
    }
}

/// Renders a report the way the pad shows it to the user.
pub fn render_report(report: &ErrorReport) -> String {
    let label = match report.source {
        ScriptKind::NativeScript => "Javascript",
        ScriptKind::SecondaryScript => "Python",
    };
    match report.line {
        Some(line) => format!("{label} error on line {line}.\n{}", report.message),
        None => format!("{label} error on unknown line.\n{}", report.message),
    }
}

/// Renders a report as one JSON line.
pub fn report_json(report: &ErrorReport) -> String {
    serde_json::to_string(report).unwrap_or_default()
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
