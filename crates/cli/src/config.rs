// SPDX-License-Identifier: MIT
// Copyright (c) 2026 The registers authors

//! CLI configuration
//!
//! Read from `registers.toml` in the working directory when present, then
//! overridden by `REGISTERS_*` environment variables. Command-line flags
//! win over both.

use crate::error::RegistersError;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE: &str = "registers.toml";

/// Environment variable overriding `rsf`
pub const RSF_ENV: &str = "REGISTERS_RSF";
/// Environment variable overriding `log`
pub const LOG_ENV: &str = "REGISTERS_LOG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default RSF log
    pub rsf: Option<PathBuf>,
    /// Log filter directive, e.g. `debug` or `registers_core=debug`
    pub log: Option<String>,
}

impl Config {
    /// Load from `path`, or from `registers.toml` if it exists
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => Self::read(path)?,
            None if Path::new(CONFIG_FILE).is_file() => Self::read(Path::new(CONFIG_FILE))?,
            None => Self::default(),
        };
        Ok(config.with_env(|name| std::env::var(name).ok()))
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Apply environment overrides through `lookup`
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(rsf) = lookup(RSF_ENV).filter(|v| !v.is_empty()) {
            self.rsf = Some(PathBuf::from(rsf));
        }
        if let Some(log) = lookup(LOG_ENV).filter(|v| !v.is_empty()) {
            self.log = Some(log);
        }
        self
    }

    /// Resolve the RSF log path, preferring an explicit flag
    pub fn rsf_path(&self, flag: Option<PathBuf>) -> Result<PathBuf, RegistersError> {
        flag.or_else(|| self.rsf.clone())
            .ok_or_else(RegistersError::rsf_not_configured)
    }
}
