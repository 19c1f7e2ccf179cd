//! Configuration loaded from `~/.config/streamscout/config.toml`.
//!
//! Every section is optional. A missing file yields the defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::classify::{MatchTarget, TrustPattern, TrustTable};

/// Default listen address for `streamscout serve`.
pub const DEFAULT_BIND: &str = "127.0.0.1:8787";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Replaces the built-in trust table when non-empty.
    #[serde(default)]
    pub trusted: Vec<TrustedEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Transport timeouts. Unset means the transport default.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

/// One `[[trusted]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrustedEntry {
    pub name: String,
    pub pattern: String,
    #[serde(default)]
    pub target: MatchTarget,
    #[serde(default = "default_case_insensitive")]
    pub case_insensitive: bool,
}

fn default_case_insensitive() -> bool {
    true
}

impl Config {
    /// Parse a config document.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid config TOML")
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file at the default location is not an error; an explicitly
    /// requested file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };

        if !explicit && !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Compile the trust table this config describes.
    pub fn trust_table(&self) -> Result<TrustTable> {
        if self.trusted.is_empty() {
            return Ok(TrustTable::defaults());
        }

        let patterns = self
            .trusted
            .iter()
            .map(|entry| {
                TrustPattern::new(
                    entry.name.clone(),
                    &entry.pattern,
                    entry.target,
                    entry.case_insensitive,
                )
                .with_context(|| format!("invalid pattern for trusted server '{}'", entry.name))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TrustTable::new(patterns))
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("streamscout")
        .join("config.toml")
}
