// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jobrelay.toml` configuration
//!
//! Every field is optional. A missing file at the default location means
//! defaults; a missing file that was named explicitly is an error.

use crate::error::JrError;
use jr_adapters::{CapabilityKind, CapabilityRegistry};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG: &str = "jobrelay.toml";
pub const DEFAULT_STATE_DIR: &str = ".jobrelay";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Holds the WAL, the log file and default publish output
    pub state_dir: PathBuf,
    pub executor: ExecutorConfig,
    pub capabilities: CapabilitiesConfig,
    pub publishers: PublishersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            executor: ExecutorConfig::default(),
            capabilities: CapabilitiesConfig::default(),
            publishers: PublishersConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutorConfig {
    /// Hard deadline for a provider run, e.g. `"30s"` or `"5m"`
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

/// Operator allowlist; an absent or empty list approves every built-in
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CapabilitiesConfig {
    pub providers: Vec<String>,
    pub publishers: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishersConfig {
    pub file: FilePublisherConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilePublisherConfig {
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Load from `path`, or from `jobrelay.toml` in the working directory
    pub fn load(path: Option<&Path>) -> Result<Self, JrError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG), false),
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => {
                return Ok(Self::default())
            }
            Err(e) => return Err(JrError::config_unreadable(&path, e)),
        };
        Self::parse(&content).map_err(|e| JrError::config_invalid(&path, e))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn wal_path(&self) -> PathBuf {
        self.state_dir.join("jobs.wal")
    }

    pub fn log_path(&self) -> PathBuf {
        self.state_dir.join("jobrelay.log")
    }

    pub fn publish_dir(&self) -> PathBuf {
        self.publishers
            .file
            .dir
            .clone()
            .unwrap_or_else(|| self.state_dir.join("published"))
    }

    /// Built-in capabilities, restricted by the configured allowlist
    pub fn registry(&self) -> CapabilityRegistry {
        let mut registry = CapabilityRegistry::builtin(self.publish_dir());
        if !self.capabilities.providers.is_empty() {
            registry.approve(CapabilityKind::Provider, &self.capabilities.providers);
        }
        if !self.capabilities.publishers.is_empty() {
            registry.approve(CapabilityKind::Publisher, &self.capabilities.publishers);
        }
        registry
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
