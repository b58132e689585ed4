// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Document assembly for the webpad playground.
//!
//! This crate turns a pad's source fragments (markup, style, native script,
//! embedded script) into complete documents: a preview document for the
//! nested execution context and a standalone export that carries the
//! embedded-interpreter runtime with it. Everything here is pure text
//! transformation; no I/O happens in this crate.

mod artifact;
mod retarget;
mod template;

pub use artifact::{
    escape_triple_quotes, extract_embedded_script, unescape_triple_quotes, Artifact,
    ArtifactKind, Assembler, SourceText, BOOTSTRAP_SCRIPT,
};
pub use retarget::retarget_markup;
pub use template::Template;
