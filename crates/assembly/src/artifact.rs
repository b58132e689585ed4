// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact assembly: composing pad sources into complete documents.
//!
//! Two document kinds exist. The *preview* document carries only the user's
//! style and (retargeted) markup plus the output sink element; the native
//! script is injected into the live context separately, after the document
//! is ready. The *standalone* document is a self-contained export: style,
//! markup, and native script inline, the pinned embedded-interpreter runtime
//! pair loaded by URL, the page bootstrap, and the user's embedded script
//! wrapped in a triple-quoted launcher call.
//!
//! Assembly is a pure function of its inputs; identical sources always
//! produce byte-identical artifacts.

use crate::retarget::retarget_markup;
use crate::template::Template;
use std::collections::HashMap;

/// Page bootstrap for the embedded interpreter, compiled into the binary.
///
/// Installs `run_script` on the host window, binds `{event}_{id}` handlers,
/// and provides the `print`/`select`/`input`/`clear` client helpers.
pub const BOOTSTRAP_SCRIPT: &str = include_str!("bootstrap.py");

const TRIPLE_QUOTE: &str = "\"\"\"";
const ESCAPED_TRIPLE_QUOTE: &str = "\\x22\\x22\\x22";

const SCRIPT_TAG_OPEN: &str = "<script type=\"text/python\">\n";
const LAUNCHER_OPEN: &str = "from browser import window\nwindow.run_script(\"\"\"\n";
const LAUNCHER_CLOSE: &str = "\n\"\"\")";

const PREVIEW_TEMPLATE: &str = r#"<html>
<head>
<style>
#css#
</style>
</head>
<body>
#html#
<pre id="stdout"></pre>
</body>
</html>
"#;

const STANDALONE_TEMPLATE: &str = r#"<html>
<head>
<meta charset="utf-8" />
<style>
#css#
</style>
<script src="https://cdnjs.cloudflare.com/ajax/libs/brython/3.10.4/brython.min.js" integrity="sha512-Ku0Q6E6RaZsR8UNZKfm4GcC0ZXrDZyzj00pFmzR6YHoR9u1R4YuaM+Ew6hj50wtOr/lFRjTvQ7ZXJfGzbPAMDQ==" crossorigin="anonymous" referrerpolicy="no-referrer"></script>
<script src="https://cdnjs.cloudflare.com/ajax/libs/brython/3.10.4/brython_stdlib.js" integrity="sha512-kMRN6F4Yq4sNLbPG2lH3EO9n776JHHZub+UWogDxVjh9uTnoVo3wtN/rnQD4C4/AZtqI2zQdvdouGAAxOGwNeA==" crossorigin="anonymous" referrerpolicy="no-referrer"></script>
<script type="text/python">
#bootstrap#
</script>
<script type="text/python">
#launcher#
</script>
</head>
<body onload="brython()">
#html#
<pre id="stdout"></pre>
</body>
<script>
#javascript#
</script>
</html>
"#;

/// Which document an assembly produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Document loaded into the nested execution context on every run.
    Preview,
    /// Self-contained export that runs without the authoring tool.
    Standalone,
}

/// Borrowed view of a pad's source fragments, one field per slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct SourceText<'a> {
    pub html: &'a str,
    pub css: &'a str,
    pub python: &'a str,
    pub javascript: &'a str,
}

/// A generated document. Never mutated after assembly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub content: String,
}

/// Composes preview and standalone documents from pad sources.
#[derive(Clone, Debug)]
pub struct Assembler {
    preview: Template,
    standalone: Template,
    bootstrap: String,
}

impl Assembler {
    /// Creates an assembler with the compiled-in bootstrap.
    pub fn new() -> Self {
        Self::with_bootstrap(BOOTSTRAP_SCRIPT)
    }

    /// Creates an assembler with replacement bootstrap text.
    pub fn with_bootstrap(bootstrap: impl Into<String>) -> Self {
        Self {
            preview: Template::new(PREVIEW_TEMPLATE),
            standalone: Template::new(STANDALONE_TEMPLATE),
            bootstrap: bootstrap.into(),
        }
    }

    /// Assembles a document of the given kind from `sources`.
    pub fn assemble(&self, kind: ArtifactKind, sources: SourceText<'_>) -> Artifact {
        let content = match kind {
            ArtifactKind::Preview => self.preview_document(sources),
            ArtifactKind::Standalone => self.standalone_document(sources),
        };
        Artifact { kind, content }
    }

    fn preview_document(&self, sources: SourceText<'_>) -> String {
        let markup = retarget_markup(sources.html);
        let mut substitutions = HashMap::new();
        substitutions.insert("css", sources.css);
        substitutions.insert("html", markup.as_str());
        self.preview.render(&substitutions)
    }

    fn standalone_document(&self, sources: SourceText<'_>) -> String {
        let launcher = launcher_block(sources.python);
        let mut substitutions = HashMap::new();
        substitutions.insert("css", sources.css);
        substitutions.insert("html", sources.html);
        substitutions.insert("bootstrap", self.bootstrap.as_str());
        substitutions.insert("launcher", launcher.as_str());
        substitutions.insert("javascript", sources.javascript);
        self.standalone.render(&substitutions)
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps the embedded script in the interpreter launcher call, escaped so
/// the script text cannot terminate the surrounding triple-quoted block.
fn launcher_block(python: &str) -> String {
    format!(
        "{LAUNCHER_OPEN}{}{LAUNCHER_CLOSE}",
        escape_triple_quotes(python)
    )
}

/// Escapes every `"""` so the text can sit inside a triple-quoted block.
///
/// The escape is value-preserving: the interpreter decodes each `\x22` back
/// to a quote, so the launched script sees its original text.
pub fn escape_triple_quotes(text: &str) -> String {
    text.replace(TRIPLE_QUOTE, ESCAPED_TRIPLE_QUOTE)
}

/// Reverses [`escape_triple_quotes`].
pub fn unescape_triple_quotes(text: &str) -> String {
    text.replace(ESCAPED_TRIPLE_QUOTE, TRIPLE_QUOTE)
}

/// Recovers the embedded script source from a standalone document.
///
/// The launcher is located by its enclosing script tag plus the import
/// preamble, so a bare `run_script("""` literal inside another slot's
/// text does not divert the search. Returns `None` when the document
/// carries no launcher block.
pub fn extract_embedded_script(artifact: &str) -> Option<String> {
    let anchor = format!("{SCRIPT_TAG_OPEN}{LAUNCHER_OPEN}");
    let start = artifact.find(&anchor)? + anchor.len();
    let end = artifact[start..].find(LAUNCHER_CLOSE)? + start;
    Some(unescape_triple_quotes(&artifact[start..end]))
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
