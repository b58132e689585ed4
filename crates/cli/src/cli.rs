// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing for the pad commands.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::project::SlotId;

/// Browser pad, minus the browser
#[derive(Parser, Debug)]
#[command(name = "webpad", version, about = "HTML/CSS/Python/Javascript pad")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Storage file backing the pad (created on first save)
    #[arg(
        long,
        env = "WEBPAD_STORAGE",
        global = true,
        default_value = "webpad-storage.json"
    )]
    pub storage: PathBuf,

    /// Config file (TOML, or JSON/JSON5 with a .json extension)
    #[arg(long, env = "WEBPAD_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Project name (overrides the stored one)
    #[arg(long, env = "WEBPAD_NAME", global = true)]
    pub name: Option<String>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a slot's text
    Get {
        /// Slot to read
        #[arg(value_enum)]
        slot: SlotArg,
    },

    /// Replace a slot's text and save
    Set {
        /// Slot to write
        #[arg(value_enum)]
        slot: SlotArg,

        /// New text; read from stdin when omitted
        text: Option<String>,
    },

    /// Empty every slot and save
    Reset,

    /// Replace the pad from a project file
    Import {
        /// Project file to read
        file: PathBuf,
    },

    /// Export the pad as a downloadable file
    Export {
        /// What to export
        #[arg(value_enum, default_value = "project")]
        kind: ExportKind,

        /// Write here instead of the export's own filename
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Print the composed preview document
    Preview,

    /// Save, rebuild the frame, and run both scripts
    Run {
        /// Scripted frame behavior file (TOML/JSON)
        #[arg(long, env = "WEBPAD_BEHAVIOR")]
        behavior: Option<PathBuf>,

        /// Readiness poll interval in milliseconds
        #[arg(long, env = "WEBPAD_POLL_INTERVAL_MS", value_parser = clap::value_parser!(u64).range(1..))]
        poll_interval_ms: Option<u64>,

        /// Frame readiness timeout in milliseconds
        #[arg(long, env = "WEBPAD_READY_TIMEOUT_MS")]
        ready_timeout_ms: Option<u64>,
    },

    /// Show pad name, last save time, and slot sizes
    Info,
}

/// Slot names as accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SlotArg {
    Html,
    Css,
    Python,
    Javascript,
}

impl From<SlotArg> for SlotId {
    fn from(slot: SlotArg) -> Self {
        match slot {
            SlotArg::Html => SlotId::Html,
            SlotArg::Css => SlotId::Css,
            SlotArg::Python => SlotId::Python,
            SlotArg::Javascript => SlotId::Javascript,
        }
    }
}

/// What `export` produces
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// Project file (flat JSON slot mapping)
    #[default]
    Project,
    /// Self-contained standalone document
    Standalone,
}

/// Output format for command results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,
    /// JSON output (one object per line where a command emits several)
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
