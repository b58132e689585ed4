// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Webpad CLI binary entry point.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;

use webpad::cli::{Cli, Command, ExportKind, OutputFormat};
use webpad::config::{Overrides, PadConfig, Settings};
use webpad::output::{exit_codes, print_error, print_warning, render_report, report_json};
use webpad::project::SlotId;
use webpad::sandbox::{FrameBehavior, SimulatedHost};
use webpad::session::{PadSession, SessionError};
use webpad::storage::FileStorage;
use webpad::time::ClockHandle;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            print_error(e.to_string());
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => PadConfig::load(path)?,
        None => PadConfig::default(),
    };

    let mut overrides = Overrides {
        name: cli.name.clone(),
        ..Overrides::default()
    };
    let mut behavior = FrameBehavior::default();
    if let Command::Run {
        behavior: behavior_path,
        poll_interval_ms,
        ready_timeout_ms,
    } = &cli.command
    {
        if let Some(path) = behavior_path {
            behavior = FrameBehavior::load(path)?;
        }
        overrides.poll_interval_ms = *poll_interval_ms;
        overrides.ready_timeout_ms = *ready_timeout_ms;
    }
    let settings = Settings::resolve(&config, &overrides);

    let storage = FileStorage::open(&cli.storage)?;
    let host = SimulatedHost::new(behavior);
    let mut session = PadSession::new(
        Box::new(storage),
        Box::new(host),
        &settings,
        ClockHandle::system(),
    )?;

    let format = cli.format;
    match cli.command {
        Command::Get { slot } => {
            let slot = SlotId::from(slot);
            match format {
                OutputFormat::Text => print_text(session.get(slot)),
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "slot": slot.name(),
                        "text": session.get(slot),
                    });
                    println!("{value}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }
        Command::Set { slot, text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            session.set_slot(slot.into(), text)?;
            Ok(exit_codes::SUCCESS)
        }
        Command::Reset => {
            session.reset()?;
            Ok(exit_codes::SUCCESS)
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;
            match session.import(&text) {
                Ok(()) => {}
                // A malformed file resets the pad rather than aborting it.
                Err(SessionError::Import(e)) => {
                    print_warning(format!("Import failed, pad reset: {e}"));
                }
                Err(e) => return Err(e.into()),
            }
            Ok(exit_codes::SUCCESS)
        }
        Command::Export { kind, output } => {
            let download = match kind {
                ExportKind::Project => session.export_project()?,
                ExportKind::Standalone => session.export_standalone()?,
            };
            let path = output.unwrap_or_else(|| PathBuf::from(&download.filename));
            std::fs::write(&path, &download.content)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            match format {
                OutputFormat::Text => println!("Wrote {}", path.display()),
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "path": path.display().to_string(),
                        "filename": download.filename,
                        "media_type": download.media_type,
                        "bytes": download.content.len(),
                    });
                    println!("{value}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }
        Command::Preview => {
            let document = session.preview_document();
            match format {
                OutputFormat::Text => print_text(&document),
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({ "document": document }));
                }
            }
            Ok(exit_codes::SUCCESS)
        }
        Command::Run { .. } => {
            let summary = session.run().await?;
            for report in &summary.reports {
                match format {
                    OutputFormat::Text => println!("{}", render_report(report)),
                    OutputFormat::Json => println!("{}", report_json(report)),
                }
            }
            if summary.reports.is_empty() {
                Ok(exit_codes::SUCCESS)
            } else {
                Ok(exit_codes::SCRIPT_ERROR)
            }
        }
        Command::Info => {
            let info = session.info();
            match format {
                OutputFormat::Text => {
                    println!("Name: {}", info.name);
                    println!("Saved: {}", info.saved_at.as_deref().unwrap_or("never"));
                    for slot in &info.slots {
                        println!("{}: {} bytes", slot.slot, slot.bytes);
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string(&info)?),
            }
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// Prints raw text, terminating the output with a newline if needed.
fn print_text(text: &str) {
    print!("{text}");
    if !text.is_empty() && !text.ends_with('\n') {
        println!();
    }
}
