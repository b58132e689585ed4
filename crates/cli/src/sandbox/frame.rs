// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The frame abstraction: a disposable nested execution context.

use crate::sandbox::report::ErrorSink;
use thiserror::Error;

/// Errors from frame creation
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Failed to create frame: {reason}")]
    CreateFailed { reason: String },
}

/// Readiness of a frame's document materialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyState {
    /// Still materializing; poll again later.
    Loading,
    /// Document fully materialized; scripts may run.
    Complete,
}

/// A live nested execution context.
///
/// Frames are disposable. Every run creates a fresh frame and drops the
/// previous one, so no global state survives from one run to the next.
/// Dropping a frame tears it down.
pub trait Frame: std::fmt::Debug + Send {
    /// Attaches the error relay.
    ///
    /// Must happen before any user script can run, so no runtime error
    /// escapes unreported.
    fn attach_error_sink(&mut self, sink: ErrorSink);

    /// Replaces the frame's entire document content.
    ///
    /// Materialization is asynchronous; observe progress through
    /// [`Frame::poll_ready`].
    fn write_document(&mut self, content: &str);

    /// Reports whether the written document has finished materializing.
    fn poll_ready(&mut self) -> ReadyState;

    /// Appends a script element carrying the native-script source. The
    /// frame executes it as part of document flow.
    fn inject_native(&mut self, source: &str);

    /// Hands the secondary-script source to the in-frame interpreter.
    /// Fire-and-forget; failures come back over the relay channel.
    fn run_secondary(&mut self, source: &str);
}

/// Creates frames. A host outlives every frame it creates.
pub trait FrameHost: Send {
    fn create_frame(&self) -> Result<Box<dyn Frame>, FrameError>;
}
