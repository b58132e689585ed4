// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The sandbox controller: frame rebuild discipline and run supersession.
//!
//! Every run demolishes the previous frame and builds a fresh one, so
//! no state leaks between runs. Readiness is polled, never blocked on,
//! and a generation counter decides which run owns the live frame: a
//! run that discovers a newer generation steps aside without touching
//! the frame or the phase. Each run listens on its own relay channel,
//! so a summary carries only reports from that run's own frame.

use crate::sandbox::frame::{Frame, FrameError, FrameHost, ReadyState};
use crate::sandbox::report::{relay_channel, ErrorReport};
use crate::time::{Clock, ClockHandle};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

/// Errors that end a run without a live frame
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("Frame not ready after {timeout_ms} ms")]
    ReadyTimeout { timeout_ms: u64 },
}

/// Where the controller is in the run lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No run in flight; the last one (if any) finished cleanly.
    Idle,
    /// Demolishing the old frame, materializing the new document.
    Building,
    /// Scripts launched; reports not yet collected.
    Ready,
    /// The last run failed to build or its scripts raised.
    Error,
}

/// How a run invocation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// This run's frame is live and both scripts were started.
    Completed,
    /// A newer run started first; this one stepped aside.
    Superseded,
}

/// What one run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    /// Error reports relayed out of the frame, in arrival order. Always
    /// empty for a superseded run; its reports belong to the newer one.
    pub reports: Vec<ErrorReport>,
}

impl RunSummary {
    fn superseded() -> Self {
        Self {
            outcome: RunOutcome::Superseded,
            reports: Vec::new(),
        }
    }
}

struct ControllerState {
    phase: Phase,
    frame: Option<Box<dyn Frame>>,
    /// Generation of the run that installed `frame`.
    frame_generation: u64,
}

/// Owns the nested frame and runs the rebuild state machine.
pub struct SandboxController {
    host: Box<dyn FrameHost>,
    state: Mutex<ControllerState>,
    generation: AtomicU64,
    clock: ClockHandle,
    poll_interval: Duration,
    ready_timeout: Duration,
}

impl SandboxController {
    pub fn new(
        host: Box<dyn FrameHost>,
        clock: ClockHandle,
        poll_interval: Duration,
        ready_timeout: Duration,
    ) -> Self {
        Self {
            host,
            state: Mutex::new(ControllerState {
                phase: Phase::Idle,
                frame: None,
                frame_generation: 0,
            }),
            generation: AtomicU64::new(0),
            clock,
            poll_interval,
            ready_timeout,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Claims the controller for `generation`: demolishes the live
    /// frame and enters `Building`. A stale generation steps aside
    /// without touching either, even when the newer run has already
    /// installed its frame. Check and teardown share one lock.
    fn begin_build(&self, generation: u64) -> bool {
        let mut state = self.state.lock();
        if !self.is_current(generation) {
            return false;
        }
        state.phase = Phase::Building;
        state.frame = None;
        true
    }

    /// Runs the composed document: demolish, rebuild, wait for
    /// readiness, launch both scripts, collect reports.
    ///
    /// Concurrent invocations are safe; all but the newest resolve to
    /// [`RunOutcome::Superseded`] without side effects on the live
    /// frame.
    pub async fn run(
        &self,
        document: &str,
        native: &str,
        secondary: &str,
    ) -> Result<RunSummary, SandboxError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.begin_build(generation) {
            return Ok(RunSummary::superseded());
        }

        let mut frame = match self.host.create_frame() {
            Ok(frame) => frame,
            Err(error) => {
                let mut state = self.state.lock();
                if self.is_current(generation) {
                    state.phase = Phase::Error;
                }
                return Err(error.into());
            }
        };

        // A fresh relay pair per run: reports stay with the run whose
        // frame sent them. The sink attaches before the document (and
        // with it any user script) can start materializing.
        let (sink, mut listener) = relay_channel();
        frame.attach_error_sink(sink);
        frame.write_document(document);

        {
            let mut state = self.state.lock();
            if !self.is_current(generation) {
                return Ok(RunSummary::superseded());
            }
            state.frame = Some(frame);
            state.frame_generation = generation;
        }

        let timeout_ms = self.ready_timeout.as_millis() as u64;
        let deadline = self.clock.now_millis().saturating_add(timeout_ms);
        loop {
            {
                let mut state = self.state.lock();
                if state.frame_generation != generation || !self.is_current(generation) {
                    return Ok(RunSummary::superseded());
                }
                match state.frame.as_mut() {
                    Some(frame) => {
                        if frame.poll_ready() == ReadyState::Complete {
                            break;
                        }
                    }
                    None => return Ok(RunSummary::superseded()),
                }
            }
            if self.clock.now_millis() >= deadline {
                let mut state = self.state.lock();
                if state.frame_generation == generation && self.is_current(generation) {
                    state.phase = Phase::Error;
                    state.frame = None;
                }
                return Err(SandboxError::ReadyTimeout { timeout_ms });
            }
            self.clock.sleep(self.poll_interval).await;
        }

        {
            let mut state = self.state.lock();
            if state.frame_generation != generation || !self.is_current(generation) {
                return Ok(RunSummary::superseded());
            }
            match state.frame.as_mut() {
                Some(frame) => {
                    frame.inject_native(native);
                    frame.run_secondary(secondary);
                    state.phase = Phase::Ready;
                }
                None => return Ok(RunSummary::superseded()),
            }
        }

        let reports = listener.drain_reports();
        {
            let mut state = self.state.lock();
            if self.is_current(generation) {
                state.phase = if reports.is_empty() {
                    Phase::Idle
                } else {
                    Phase::Error
                };
            }
        }
        Ok(RunSummary {
            outcome: RunOutcome::Completed,
            reports,
        })
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
