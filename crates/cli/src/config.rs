// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pad configuration: an optional TOML/JSON config file merged under
//! command-line flags, with built-in defaults underneath both.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default interval between frame readiness polls, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10;
/// Default time to wait for a frame to become ready before giving up.
pub const DEFAULT_READY_TIMEOUT_MS: u64 = 5_000;
/// Project name used when none has been chosen.
pub const DEFAULT_PROJECT_NAME: &str = "unnamed";

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Config file contents. Every field is optional; missing values fall
/// back to built-in defaults at resolution time.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PadConfig {
    /// Project name to load and save under.
    #[serde(default)]
    pub name: Option<String>,

    /// Interval between readiness polls, in milliseconds.
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,

    /// How long to wait for a frame to become ready, in milliseconds.
    #[serde(default)]
    pub ready_timeout_ms: Option<u64>,

    /// Path to a Python bootstrap that replaces the built-in one in
    /// assembled documents.
    #[serde(default)]
    pub bootstrap_path: Option<PathBuf>,
}

impl PadConfig {
    /// Loads config from a TOML or JSON file, chosen by extension.
    ///
    /// JSON files may use JSON5 syntax (comments, trailing commas).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PadConfig = if path.extension().is_some_and(|e| e == "json") {
            parse_json5_or_json(&content)?
        } else {
            toml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == Some(0) {
            return Err(ConfigError::Validation(
                "poll_interval_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse content as JSON5, falling back to strict JSON on parse failure.
pub(crate) fn parse_json5_or_json<T: serde::de::DeserializeOwned>(
    content: &str,
) -> Result<T, serde_json::Error> {
    json5::from_str(content).or_else(|_| serde_json::from_str(content))
}

/// Flag-level overrides. Highest precedence.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub name: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub ready_timeout_ms: Option<u64>,
    pub bootstrap_path: Option<PathBuf>,
}

/// Effective settings after merging flags over the config file over
/// built-in defaults.
///
/// `name` stays optional here: an explicit name outranks the stored
/// one, but the stored name outranks [`DEFAULT_PROJECT_NAME`], and only
/// the session can see storage.
#[derive(Clone, Debug)]
pub struct Settings {
    pub name: Option<String>,
    pub poll_interval: Duration,
    pub ready_timeout: Duration,
    pub bootstrap_path: Option<PathBuf>,
}

impl Settings {
    /// Merges one layer of overrides onto one config file layer.
    pub fn resolve(config: &PadConfig, overrides: &Overrides) -> Self {
        Self {
            name: overrides.name.clone().or_else(|| config.name.clone()),
            poll_interval: Duration::from_millis(
                overrides
                    .poll_interval_ms
                    .or(config.poll_interval_ms)
                    .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            ),
            ready_timeout: Duration::from_millis(
                overrides
                    .ready_timeout_ms
                    .or(config.ready_timeout_ms)
                    .unwrap_or(DEFAULT_READY_TIMEOUT_MS),
            ),
            bootstrap_path: overrides
                .bootstrap_path
                .clone()
                .or_else(|| config.bootstrap_path.clone()),
        }
    }

    /// Reads the bootstrap override, if one is configured.
    pub fn read_bootstrap(&self) -> Result<Option<String>, ConfigError> {
        match &self.bootstrap_path {
            Some(path) => std::fs::read_to_string(path)
                .map(Some)
                .map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                }),
            None => Ok(None),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(&PadConfig::default(), &Overrides::default())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
