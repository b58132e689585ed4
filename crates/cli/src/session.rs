// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The pad session: one project's sources, storage, assembly, and
//! sandbox, wired together behind the operations the CLI exposes.
//!
//! Persistence ordering: every operation that consumes the sources
//! (run, export) saves them first, so consumers never observe state
//! older than the latest edit.

use crate::config::{ConfigError, Settings, DEFAULT_PROJECT_NAME};
use crate::project::{ProjectError, SlotId, SourceSet};
use crate::sandbox::{FrameHost, RunSummary, SandboxController, SandboxError};
use crate::storage::{KeyValueStorage, StorageError, StorageKeys};
use crate::time::{Clock, ClockHandle};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;
use webpad_assembly::{Artifact, ArtifactKind, Assembler, SourceText};

/// Errors from session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    #[error("Failed to import project: {0}")]
    Import(#[from] ProjectError),
}

/// A file offered to the user, with the metadata a save dialog needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub media_type: String,
    pub content: String,
}

/// Summary of the current pad, for the `info` command.
#[derive(Clone, Debug, Serialize)]
pub struct SessionInfo {
    pub name: String,
    /// RFC 3339 time of the last save, if the pad was ever saved.
    pub saved_at: Option<String>,
    /// Per-slot sizes, in slot order.
    pub slots: Vec<SlotInfo>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SlotInfo {
    pub slot: String,
    pub bytes: usize,
}

/// One open pad.
pub struct PadSession {
    sources: SourceSet,
    name: String,
    storage: Box<dyn KeyValueStorage>,
    keys: StorageKeys,
    assembler: Assembler,
    controller: SandboxController,
    clock: ClockHandle,
}

impl PadSession {
    /// Opens a session over the given storage and frame host.
    ///
    /// Stored sources load fail-soft: an absent or malformed project
    /// key leaves a fresh pad. The effective name is the explicit one
    /// from settings, else the stored one, else the default.
    pub fn new(
        storage: Box<dyn KeyValueStorage>,
        host: Box<dyn FrameHost>,
        settings: &Settings,
        clock: ClockHandle,
    ) -> Result<Self, SessionError> {
        let assembler = match settings.read_bootstrap()? {
            Some(bootstrap) => Assembler::with_bootstrap(bootstrap),
            None => Assembler::new(),
        };
        let controller = SandboxController::new(
            host,
            clock.clone(),
            settings.poll_interval,
            settings.ready_timeout,
        );
        let keys = StorageKeys::new();

        let mut sources = SourceSet::new();
        sources.load_from(storage.as_ref(), &keys.project());
        let name = settings
            .name
            .clone()
            .or_else(|| storage.get(&keys.filename()))
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());

        Ok(Self {
            sources,
            name,
            storage,
            keys,
            assembler,
            controller,
            clock,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current text of a slot.
    pub fn get(&self, slot: SlotId) -> &str {
        self.sources.get(slot)
    }

    /// Replaces a slot's text and persists the pad.
    pub fn set_slot(&mut self, slot: SlotId, text: impl Into<String>) -> Result<(), SessionError> {
        self.sources.set(slot, text);
        self.save()
    }

    /// Empties every slot and persists the fresh pad.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.sources.reset();
        self.save()
    }

    /// Persists sources, name, and a save timestamp.
    pub fn save(&mut self) -> Result<(), SessionError> {
        let serialized = self.sources.serialize();
        let saved_at = self.now_rfc3339();
        self.storage.set(&self.keys.project(), &serialized)?;
        self.storage.set(&self.keys.filename(), &self.name)?;
        self.storage.set(&self.keys.saved_at(), &saved_at)?;
        Ok(())
    }

    /// Replaces the pad with an imported project file.
    ///
    /// Malformed input resets every slot; the resulting state persists
    /// either way, and the parse failure is reported so the caller can
    /// warn instead of silently losing data.
    pub fn import(&mut self, text: &str) -> Result<(), SessionError> {
        let parsed = self.sources.try_deserialize(text);
        self.save()?;
        parsed?;
        Ok(())
    }

    /// The pad serialized as a downloadable project file.
    pub fn export_project(&mut self) -> Result<Download, SessionError> {
        self.save()?;
        Ok(Download {
            filename: ensure_extension(&self.name, ".webpad"),
            media_type: "application/json".to_string(),
            content: self.sources.serialize(),
        })
    }

    /// The pad assembled as a downloadable standalone document.
    pub fn export_standalone(&mut self) -> Result<Download, SessionError> {
        self.save()?;
        let artifact = self.assemble(ArtifactKind::Standalone);
        Ok(Download {
            filename: ensure_extension(&self.name, ".html"),
            media_type: "text/html".to_string(),
            content: artifact.content,
        })
    }

    /// The preview document as it would be written into a frame.
    pub fn preview_document(&self) -> String {
        self.assemble(ArtifactKind::Preview).content
    }

    /// Saves, assembles the preview, and runs it in a fresh frame.
    pub async fn run(&mut self) -> Result<RunSummary, SessionError> {
        self.save()?;
        let preview = self.assemble(ArtifactKind::Preview);
        let summary = self
            .controller
            .run(
                &preview.content,
                self.sources.get(SlotId::Javascript),
                self.sources.get(SlotId::Python),
            )
            .await?;
        Ok(summary)
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            name: self.name.clone(),
            saved_at: self.storage.get(&self.keys.saved_at()),
            slots: SlotId::ALL
                .iter()
                .map(|slot| SlotInfo {
                    slot: slot.name().to_string(),
                    bytes: self.sources.get(*slot).len(),
                })
                .collect(),
        }
    }

    fn assemble(&self, kind: ArtifactKind) -> Artifact {
        self.assembler.assemble(
            kind,
            SourceText {
                html: self.sources.get(SlotId::Html),
                css: self.sources.get(SlotId::Css),
                python: self.sources.get(SlotId::Python),
                javascript: self.sources.get(SlotId::Javascript),
            },
        )
    }

    fn now_rfc3339(&self) -> String {
        let millis = self.clock.now_millis() as i64;
        DateTime::<Utc>::from_timestamp_millis(millis)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Appends `extension` unless the name already ends with it.
fn ensure_extension(name: &str, extension: &str) -> String {
    if name.ends_with(extension) {
        name.to_string()
    } else {
        format!("{name}{extension}")
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
