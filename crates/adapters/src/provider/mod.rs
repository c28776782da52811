// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provider capability: performs a job's work

mod echo;
mod shell;

pub use echo::EchoProvider;
pub use shell::ShellProvider;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeBehavior, FakeProvider, ProviderCall};

use async_trait::async_trait;
use jr_core::Job;
use thiserror::Error;

/// Errors raised from inside a provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("job {0} has no payload")]
    MissingPayload(String),
    #[error("cancelled")]
    Cancelled,
    #[error("{0}")]
    Failed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Execution handler for a job
///
/// `process` must leave `job.success` reflecting the outcome before it
/// returns; the executor never decides success on the provider's behalf.
/// `cancel` may be called from another task while `process` is running.
#[async_trait]
pub trait Provider: Send + Sync + 'static {
    /// Human-readable name for logs
    fn name(&self) -> &str;

    /// Perform the job's work against its payload
    async fn process(&self, job: &mut Job) -> Result<(), ProviderError>;

    /// Output to record on the job; meaningful once `process` has returned
    fn result(&self) -> Option<String>;

    /// Ask an in-flight `process` to stop as soon as feasible. Never fails.
    fn cancel(&self);
}
