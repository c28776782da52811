// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Publisher capability: reports a completed job somewhere

mod file;
mod log;

pub use file::FilePublisher;
pub use log::LogPublisher;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePublisher, PublisherCall};

use async_trait::async_trait;
use jr_core::Job;
use thiserror::Error;

/// Errors raised from inside a publisher
#[derive(Debug, Error)]
pub enum PublisherError {
    #[error("{0}")]
    Failed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result reporter for a completed job
///
/// `Ok(false)` from either method means "declined", which the publish worker
/// records the same way as an error.
#[async_trait]
pub trait Publisher: Send + Sync + 'static {
    /// Human-readable name, used in job messages
    fn name(&self) -> &str;

    /// Prepare to publish this job
    async fn initialize(&self, job: &Job) -> Result<bool, PublisherError>;

    /// Deliver the job's result
    async fn publish(&self, job: &Job) -> Result<bool, PublisherError>;
}
