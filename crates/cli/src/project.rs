// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The source set: a fixed, ordered collection of named text slots.
//!
//! A pad always has exactly four slots (html, css, python, javascript).
//! Slots hold plain strings, default to empty, and serialize to a single
//! flat JSON object so the storage format and the project file format are
//! the same representation.

use crate::storage::{KeyValueStorage, StorageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Version string written into serialized projects.
///
/// Readers ignore it; it exists so a future format change can be detected
/// without breaking the flat name-to-string mapping.
pub const PROJECT_FORMAT_VERSION: &str = "1";

/// Errors from explicit project parsing
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Failed to parse project JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One named source slot of a pad.
///
/// The slot set is fixed configuration; it never changes at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotId {
    Html,
    Css,
    Python,
    Javascript,
}

impl SlotId {
    /// All slots, in declaration and serialization order.
    pub const ALL: [SlotId; 4] = [SlotId::Html, SlotId::Css, SlotId::Python, SlotId::Javascript];

    /// The slot's serialized name.
    pub fn name(self) -> &'static str {
        match self {
            SlotId::Html => "html",
            SlotId::Css => "css",
            SlotId::Python => "python",
            SlotId::Javascript => "javascript",
        }
    }

    /// Looks a slot up by its serialized name.
    pub fn from_name(name: &str) -> Option<SlotId> {
        Self::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serialized project shape: `$version` plus one string per slot.
///
/// Every field defaults so a partial mapping loads cleanly; unknown keys
/// are ignored.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ProjectFile {
    #[serde(rename = "$version", default)]
    version: String,
    #[serde(default)]
    html: String,
    #[serde(default)]
    css: String,
    #[serde(default)]
    python: String,
    #[serde(default)]
    javascript: String,
}

/// The in-memory source set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceSet {
    html: String,
    css: String,
    python: String,
    javascript: String,
}

impl SourceSet {
    /// Creates a source set with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current text of a slot (empty if never set).
    pub fn get(&self, slot: SlotId) -> &str {
        match slot {
            SlotId::Html => &self.html,
            SlotId::Css => &self.css,
            SlotId::Python => &self.python,
            SlotId::Javascript => &self.javascript,
        }
    }

    /// Replaces the text of a slot. In-memory only; storage is untouched.
    pub fn set(&mut self, slot: SlotId, text: impl Into<String>) {
        let text = text.into();
        match slot {
            SlotId::Html => self.html = text,
            SlotId::Css => self.css = text,
            SlotId::Python => self.python = text,
            SlotId::Javascript => self.javascript = text,
        }
    }

    /// Sets every slot to the empty string, in place.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when every slot is empty.
    pub fn is_empty(&self) -> bool {
        SlotId::ALL.iter().all(|slot| self.get(*slot).is_empty())
    }

    /// Serializes the full mapping as one JSON object with stable key
    /// order (`$version`, then slots in declaration order).
    pub fn serialize(&self) -> String {
        let file = ProjectFile {
            version: PROJECT_FORMAT_VERSION.to_string(),
            html: self.html.clone(),
            css: self.css.clone(),
            python: self.python.clone(),
            javascript: self.javascript.clone(),
        };
        serde_json::to_string(&file).unwrap_or_default()
    }

    /// Loads the mapping from serialized text, failing soft.
    ///
    /// Malformed input resets every slot to empty and is otherwise
    /// ignored. Use [`SourceSet::try_deserialize`] to observe the parse
    /// error; the resulting state is identical either way.
    pub fn deserialize(&mut self, text: &str) {
        let _ = self.try_deserialize(text);
    }

    /// Like [`SourceSet::deserialize`], but reports the parse failure.
    ///
    /// Missing slot names resolve to empty strings; unknown names are
    /// ignored. A slot bound to a non-string value makes the whole input
    /// malformed.
    pub fn try_deserialize(&mut self, text: &str) -> Result<(), ProjectError> {
        self.reset();
        let file: ProjectFile = serde_json::from_str(text)?;
        self.html = file.html;
        self.css = file.css;
        self.python = file.python;
        self.javascript = file.javascript;
        Ok(())
    }

    /// Writes the serialized mapping to storage under `key`.
    pub fn persist_to(
        &self,
        storage: &mut dyn KeyValueStorage,
        key: &str,
    ) -> Result<(), StorageError> {
        storage.set(key, &self.serialize())
    }

    /// Loads the mapping from storage under `key`, failing soft.
    ///
    /// An absent key leaves a fresh pad: every slot empty.
    pub fn load_from(&mut self, storage: &dyn KeyValueStorage, key: &str) {
        match storage.get(key) {
            Some(text) => self.deserialize(&text),
            None => self.reset(),
        }
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
