// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! A scripted frame host for tests and offline runs.
//!
//! Real frames live in a browser. The simulated host stands in for one:
//! its frames follow a [`FrameBehavior`] script (how many polls until
//! ready, which scripts fail and how) and log everything they are asked
//! to do, so behavior can be asserted after the fact.

use crate::config::{parse_json5_or_json, ConfigError};
use crate::sandbox::frame::{Frame, FrameError, FrameHost, ReadyState};
use crate::sandbox::report::{ErrorSink, RawFrameError, ScriptKind};
use parking_lot::Mutex;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// A scripted failure for one of the frame's scripts.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptedError {
    /// Message the frame raises.
    pub message: String,

    /// Line the runtime attributes the failure to, if it knows one.
    #[serde(default)]
    pub line: Option<u32>,

    /// Raw trace accompanying the failure.
    #[serde(default)]
    pub trace: Option<String>,
}

/// Scripted behavior applied to every frame the host creates.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameBehavior {
    /// Readiness polls to absorb before reporting complete.
    #[serde(default)]
    pub ready_after_polls: u32,

    /// Never report complete; forces the ready timeout.
    #[serde(default)]
    pub never_ready: bool,

    /// Fail frame creation outright, with this reason.
    #[serde(default)]
    pub fail_create: Option<String>,

    /// Raise this when the native script is injected.
    #[serde(default)]
    pub native_error: Option<ScriptedError>,

    /// Raise this when the secondary script runs.
    #[serde(default)]
    pub secondary_error: Option<ScriptedError>,

    /// Messages sent over the relay as soon as it is attached. Lets a
    /// run exercise the listener's shape filtering.
    #[serde(default)]
    pub chatter: Vec<serde_json::Value>,
}

impl FrameBehavior {
    /// Loads behavior from a TOML or JSON file, chosen by extension.
    ///
    /// JSON files may use JSON5 syntax (comments, trailing commas).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if path.extension().is_some_and(|e| e == "json") {
            Ok(parse_json5_or_json(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }
}

/// What one simulated frame saw, for assertions after the fact.
#[derive(Clone, Debug, Default)]
pub struct FrameRecord {
    /// Document content written into the frame.
    pub document: String,
    /// Native-script source injected, if the run got that far.
    pub native: Option<String>,
    /// Secondary-script source handed to the interpreter.
    pub secondary: Option<String>,
    /// Readiness polls the frame absorbed.
    pub polls: u32,
    /// Whether the frame has been torn down.
    pub dropped: bool,
}

/// Frame host whose frames follow a scripted [`FrameBehavior`].
///
/// Cloning the host shares the log, so a test can keep one handle while
/// the controller owns another.
#[derive(Clone, Debug, Default)]
pub struct SimulatedHost {
    behavior: FrameBehavior,
    log: Arc<Mutex<Vec<FrameRecord>>>,
}

impl SimulatedHost {
    pub fn new(behavior: FrameBehavior) -> Self {
        Self {
            behavior,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of every frame created so far, in creation order.
    pub fn records(&self) -> Vec<FrameRecord> {
        self.log.lock().clone()
    }

    /// The record of the most recently created frame.
    pub fn last_record(&self) -> Option<FrameRecord> {
        self.log.lock().last().cloned()
    }

    pub fn frame_count(&self) -> usize {
        self.log.lock().len()
    }
}

impl FrameHost for SimulatedHost {
    fn create_frame(&self) -> Result<Box<dyn Frame>, FrameError> {
        if let Some(reason) = &self.behavior.fail_create {
            return Err(FrameError::CreateFailed {
                reason: reason.clone(),
            });
        }
        let index = {
            let mut log = self.log.lock();
            log.push(FrameRecord::default());
            log.len() - 1
        };
        Ok(Box::new(SimulatedFrame {
            behavior: self.behavior.clone(),
            log: Arc::clone(&self.log),
            index,
            polls: 0,
            sink: None,
        }))
    }
}

#[derive(Debug)]
struct SimulatedFrame {
    behavior: FrameBehavior,
    log: Arc<Mutex<Vec<FrameRecord>>>,
    index: usize,
    polls: u32,
    sink: Option<ErrorSink>,
}

impl SimulatedFrame {
    fn with_record(&self, update: impl FnOnce(&mut FrameRecord)) {
        let mut log = self.log.lock();
        if let Some(record) = log.get_mut(self.index) {
            update(record);
        }
    }

    fn raise(&self, kind: ScriptKind, scripted: &ScriptedError) {
        if let Some(sink) = &self.sink {
            sink.report(RawFrameError {
                kind,
                message: scripted.message.clone(),
                line: scripted.line,
                trace: scripted.trace.clone(),
            });
        }
    }
}

impl Frame for SimulatedFrame {
    fn attach_error_sink(&mut self, sink: ErrorSink) {
        for value in &self.behavior.chatter {
            sink.relay_raw(value.clone());
        }
        self.sink = Some(sink);
    }

    fn write_document(&mut self, content: &str) {
        self.with_record(|record| record.document = content.to_string());
    }

    fn poll_ready(&mut self) -> ReadyState {
        self.polls += 1;
        let polls = self.polls;
        self.with_record(|record| record.polls = polls);
        if self.behavior.never_ready || polls <= self.behavior.ready_after_polls {
            ReadyState::Loading
        } else {
            ReadyState::Complete
        }
    }

    fn inject_native(&mut self, source: &str) {
        self.with_record(|record| record.native = Some(source.to_string()));
        if let Some(scripted) = self.behavior.native_error.clone() {
            self.raise(ScriptKind::NativeScript, &scripted);
        }
    }

    fn run_secondary(&mut self, source: &str) {
        self.with_record(|record| record.secondary = Some(source.to_string()));
        if let Some(scripted) = self.behavior.secondary_error.clone() {
            self.raise(ScriptKind::SecondaryScript, &scripted);
        }
    }
}

impl Drop for SimulatedFrame {
    fn drop(&mut self) {
        self.with_record(|record| record.dropped = true);
    }
}

#[cfg(test)]
#[path = "sim_tests.rs"]
mod tests;
