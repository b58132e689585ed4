// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Line-number recovery from raw failure traces.

/// Frame labels that mark the user program itself, as opposed to
/// runtime or library frames. Interpreters disagree on the label, so
/// all known spellings are accepted.
const ANONYMOUS_MARKERS: [&str; 3] = ["<anonymous>", "<string>", "<module>"];

/// Extracts the source line of the first frame attributable to the
/// user's program.
///
/// Scans for the earliest anonymous-execution marker and takes the
/// first integer after it. Returns `None` for traces with no such
/// marker, no following integer, or an out-of-range number; callers
/// render that as an unknown line. Never panics.
pub fn line_from_trace(trace: &str) -> Option<u32> {
    let after_marker = ANONYMOUS_MARKERS
        .iter()
        .filter_map(|marker| trace.find(marker).map(|at| (at, at + marker.len())))
        .min_by_key(|(at, _)| *at)
        .map(|(_, end)| end)?;
    first_integer(&trace[after_marker..])
}

fn first_integer(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
#[path = "trace_tests.rs"]
mod tests;
