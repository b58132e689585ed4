// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal `#`-delimited substitution templates.
//!
//! A template names its insertion points between pairs of `#` markers
//! (`<style>#css#</style>`). Rendering walks the text left to right and
//! replaces each complete marker pair with the named substitution value.
//! There is no recursion and no escape for a literal marker; a trailing
//! marker without a partner is emitted verbatim.

use std::collections::HashMap;

/// Marker character that delimits tag names inside template text.
const MARKER: char = '#';

/// A substitution template over plain text.
#[derive(Clone, Debug)]
pub struct Template {
    text: String,
}

impl Template {
    /// Creates a template from raw text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Renders the template, replacing each `#tag#` pair with the matching
    /// substitution value.
    ///
    /// Markers are consumed strictly left to right in matched pairs. A tag
    /// with no substitution renders as the empty string. Substitution values
    /// are inserted verbatim and never rescanned for markers.
    pub fn render(&self, substitutions: &HashMap<&str, &str>) -> String {
        let text = self.text.as_str();
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        while let Some(open) = find_marker(text, cursor) {
            let Some(close) = find_marker(text, open + 1) else {
                break;
            };
            out.push_str(&text[cursor..open]);
            let tag = &text[open + 1..close];
            if let Some(value) = substitutions.get(tag) {
                out.push_str(value);
            }
            cursor = close + 1;
        }
        out.push_str(&text[cursor..]);
        out
    }
}

fn find_marker(text: &str, from: usize) -> Option<usize> {
    // The marker is a single byte, so byte offsets stay on char boundaries.
    text[from..].find(MARKER).map(|at| from + at)
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
