// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Link retargeting for previewed markup.
//!
//! Preview documents run inside a nested frame; a plain `<a href>` or
//! `<form action>` would navigate that frame and replace the running pad.
//! Before the markup goes into a preview document, navigation elements are
//! rewritten to open in a new top-level browsing context instead.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Static regex for opening `<a>`, `<area>`, and `<form>` tags.
static NAVIGATION_TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)<(a|area|form)\b([^>]*)>").ok());

/// Static regex for an existing `target` attribute inside an attribute list.
static TARGET_ATTR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(^|\s)target\s*=").ok());

/// Rewrites navigation elements in `markup` with `target="_blank"`.
///
/// Tags that already carry a `target` attribute are left untouched, as is
/// all text outside the opening tags themselves. Attribute values that
/// contain a literal `>` are not handled.
pub fn retarget_markup(markup: &str) -> String {
    let (Some(tag), Some(target)) = (NAVIGATION_TAG.as_ref(), TARGET_ATTR.as_ref()) else {
        return markup.to_string();
    };
    tag.replace_all(markup, |caps: &Captures<'_>| {
        let name = &caps[1];
        let attrs = caps.get(2).map_or("", |m| m.as_str());
        if target.is_match(attrs) {
            return caps[0].to_string();
        }
        match attrs.trim_end().strip_suffix('/') {
            Some(rest) => format!("<{}{} target=\"_blank\" />", name, rest.trim_end()),
            None => format!("<{}{} target=\"_blank\">", name, attrs.trim_end()),
        }
    })
    .into_owned()
}

#[cfg(test)]
#[path = "retarget_tests.rs"]
mod tests;
