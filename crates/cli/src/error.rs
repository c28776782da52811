// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! This module provides enhanced error types that include:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use jr_engine::{ExecuteError, RuntimeError};
use jr_storage::StoreError;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct JrError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl JrError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for JrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for JrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for typical failure scenarios.
impl JrError {
    /// Error for a uuid or prefix that matches no job.
    pub fn job_not_found(prefix: &str) -> Self {
        JrError::new(format!("Job '{}' not found", prefix))
            .with_context("Jobs are looked up by uuid or a unique uuid prefix")
            .with_suggestion("List known jobs: jr list")
    }

    /// Error for a prefix that matches several jobs.
    pub fn ambiguous_prefix(prefix: &str, count: usize) -> Self {
        JrError::new(format!("Prefix '{}' matches {} jobs", prefix, count))
            .with_suggestion("Use a longer prefix or the full uuid")
            .with_suggestion("List known jobs: jr list")
    }

    /// Error for a job that cannot be run.
    pub fn invalid_job(missing: &str) -> Self {
        JrError::new(format!("Job cannot run without a {}", missing))
            .with_context("The provider needs a payload to work on")
            .with_suggestion("Pass one with: jr run --payload <TEXT> ...")
    }

    /// Error for a config file that cannot be read.
    pub fn config_unreadable(path: &Path, err: std::io::Error) -> Self {
        JrError::new(format!("Cannot read config '{}'", path.display()))
            .with_context(err.to_string())
            .with_suggestion("Check the --config path")
            .with_source(err)
    }

    /// Error for a config file that does not parse.
    pub fn config_invalid(path: &Path, err: toml::de::Error) -> Self {
        JrError::new(format!("Invalid config '{}'", path.display()))
            .with_context(err.message().to_string())
            .with_suggestion("Known keys: state_dir, [executor] timeout, [capabilities] providers/publishers, [publishers.file] dir")
            .with_source(err)
    }

    /// Error for a state directory that cannot be opened.
    pub fn store_unavailable(path: &Path, err: StoreError) -> Self {
        JrError::new(format!("Cannot open job store '{}'", path.display()))
            .with_context(err.to_string())
            .with_suggestion("Check that the state directory is writable")
            .with_suggestion("Point elsewhere with: jr --state-dir <DIR> ...")
            .with_source(err)
    }
}

impl From<StoreError> for JrError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(prefix) => JrError::job_not_found(&prefix),
            StoreError::Ambiguous { prefix, count } => JrError::ambiguous_prefix(&prefix, count),
            other => JrError::new(other.to_string()).with_source(other),
        }
    }
}

impl From<RuntimeError> for JrError {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::Execute(ExecuteError::InvalidJob { missing, .. }) => {
                JrError::invalid_job(missing)
            }
            RuntimeError::Execute(ExecuteError::Store(e)) | RuntimeError::Store(e) => e.into(),
            other => JrError::new(other.to_string()).with_source(other),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
