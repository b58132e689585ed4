// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sandboxed execution of the composed document.
//!
//! This module owns everything between "run was pressed" and "errors
//! were shown":
//!
//! - The [`Frame`] abstraction over a disposable nested execution
//!   context, and a [`FrameHost`] that creates them
//! - The relay channel carrying structured [`ErrorReport`]s out of the
//!   frame, with shape filtering on the host side
//! - The [`SandboxController`] state machine: demolish, rebuild, poll
//!   readiness, launch scripts, supersede stale runs
//! - A [`SimulatedHost`] whose frames follow a scripted
//!   [`FrameBehavior`], for tests and offline runs

pub mod controller;
pub mod frame;
pub mod report;
pub mod sim;
pub mod trace;

pub use controller::{Phase, RunOutcome, RunSummary, SandboxController, SandboxError};
pub use frame::{Frame, FrameError, FrameHost, ReadyState};
pub use report::{relay_channel, ErrorReport, ErrorSink, HostListener, RawFrameError, ScriptKind};
pub use sim::{FrameBehavior, FrameRecord, ScriptedError, SimulatedHost};
pub use trace::line_from_trace;
