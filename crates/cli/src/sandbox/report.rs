// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error reports relayed from a frame to its host.
//!
//! The relay channel is fire-and-forget: the frame sends whatever it
//! wants, and the host-side listener keeps only messages that parse as
//! error reports, dropping everything else unread.

use crate::sandbox::trace::line_from_trace;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Which script inside the frame produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptKind {
    /// The javascript slot, executed natively by the frame.
    NativeScript,
    /// The python slot, executed through the interpreter bootstrap.
    SecondaryScript,
}

/// A structured error report, as carried over the relay channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Message type; the host only acts on `"error"`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Which script failed.
    pub source: ScriptKind,
    /// 1-based source line, when one could be determined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Human-readable message or stack fragment.
    pub message: String,
}

impl ErrorReport {
    pub fn new(source: ScriptKind, line: Option<u32>, message: impl Into<String>) -> Self {
        Self {
            event_type: "error".to_string(),
            source,
            line,
            message: message.into(),
        }
    }

    /// True when the message type marks this as an error report.
    pub fn is_error(&self) -> bool {
        self.event_type == "error"
    }
}

/// An error as captured inside the frame, before normalization.
#[derive(Clone, Debug)]
pub struct RawFrameError {
    pub kind: ScriptKind,
    pub message: String,
    /// Line reported by the runtime itself, if it gave one.
    pub line: Option<u32>,
    /// Raw stack trace, when the runtime produced one.
    pub trace: Option<String>,
}

/// Frame-side sender half of the relay channel.
#[derive(Clone, Debug)]
pub struct ErrorSink {
    tx: mpsc::UnboundedSender<serde_json::Value>,
}

impl ErrorSink {
    /// Normalizes a captured error and relays it.
    ///
    /// The line number comes from the runtime when it reported one, and
    /// is otherwise recovered from the stack trace.
    pub fn report(&self, raw: RawFrameError) {
        let line = raw
            .line
            .or_else(|| raw.trace.as_deref().and_then(line_from_trace));
        let report = ErrorReport::new(raw.kind, line, raw.message);
        if let Ok(value) = serde_json::to_value(&report) {
            let _ = self.tx.send(value);
        }
    }

    /// Relays an arbitrary message without interpretation.
    pub fn relay_raw(&self, value: serde_json::Value) {
        let _ = self.tx.send(value);
    }
}

/// Host-side receiver half of the relay channel.
#[derive(Debug)]
pub struct HostListener {
    rx: mpsc::UnboundedReceiver<serde_json::Value>,
}

impl HostListener {
    /// Returns the next queued error report, consuming and skipping any
    /// messages that are not one.
    pub fn try_next_report(&mut self) -> Option<ErrorReport> {
        while let Ok(value) = self.rx.try_recv() {
            if let Some(report) = as_error_report(value) {
                return Some(report);
            }
        }
        None
    }

    /// Drains everything queued, returning the error reports in arrival
    /// order.
    pub fn drain_reports(&mut self) -> Vec<ErrorReport> {
        let mut reports = Vec::new();
        while let Some(report) = self.try_next_report() {
            reports.push(report);
        }
        reports
    }
}

fn as_error_report(value: serde_json::Value) -> Option<ErrorReport> {
    let report: ErrorReport = serde_json::from_value(value).ok()?;
    report.is_error().then_some(report)
}

/// Creates a connected sink/listener pair.
pub fn relay_channel() -> (ErrorSink, HostListener) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ErrorSink { tx }, HostListener { rx })
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
