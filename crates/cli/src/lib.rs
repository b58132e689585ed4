// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Webpad CLI
//!
//! A command-line pad for small web experiments. Each pad holds four source
//! slots (html, css, python, javascript), persists them through a key-value
//! store, and can assemble them into preview or standalone HTML documents.
//! The `run` command executes the assembled document in a simulated frame
//! and reports script errors back on the terminal.

// Internal modules - pub for binary access, hidden from docs
#[doc(hidden)]
pub mod cli;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod output;
#[doc(hidden)]
pub mod project;
#[doc(hidden)]
pub mod sandbox;
#[doc(hidden)]
pub mod session;
#[doc(hidden)]
pub mod storage;
#[doc(hidden)]
pub mod time;
