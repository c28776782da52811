// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced capability wrappers for consistent observability
//!
//! The registry hands out providers and publishers wrapped in these so every
//! call gets a span, timing, and an outcome log regardless of implementation.

use crate::provider::{Provider, ProviderError};
use crate::publisher::{Publisher, PublisherError};
use async_trait::async_trait;
use jr_core::Job;
use std::sync::Arc;
use tracing::Instrument;

/// Wrapper that adds tracing to any Provider
#[derive(Clone)]
pub struct TracedProvider {
    key: String,
    inner: Arc<dyn Provider>,
}

impl TracedProvider {
    pub fn new(key: impl Into<String>, inner: Arc<dyn Provider>) -> Self {
        Self {
            key: key.into(),
            inner,
        }
    }

    /// Capability key this provider was resolved from
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl Provider for TracedProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn process(&self, job: &mut Job) -> Result<(), ProviderError> {
        let span = tracing::info_span!("provider.process", key = %self.key, job = job.uuid());
        async {
            tracing::info!(name = %job.name, "starting");
            let start = std::time::Instant::now();
            let result = self.inner.process(job).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(()) => tracing::info!(success = job.success, elapsed_ms, "processed"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "process failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    fn result(&self) -> Option<String> {
        self.inner.result()
    }

    fn cancel(&self) {
        tracing::info!(key = %self.key, "cancel requested");
        self.inner.cancel();
    }
}

/// Wrapper that adds tracing to any Publisher
#[derive(Clone)]
pub struct TracedPublisher {
    key: String,
    inner: Arc<dyn Publisher>,
}

impl TracedPublisher {
    pub fn new(key: impl Into<String>, inner: Arc<dyn Publisher>) -> Self {
        Self {
            key: key.into(),
            inner,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl Publisher for TracedPublisher {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn initialize(&self, job: &Job) -> Result<bool, PublisherError> {
        let span =
            tracing::info_span!("publisher.initialize", key = %self.key, job = job.uuid());
        async {
            let result = self.inner.initialize(job).await;
            match &result {
                Ok(true) => tracing::debug!("initialized"),
                Ok(false) => tracing::warn!("initialize declined"),
                Err(e) => tracing::error!(error = %e, "initialize failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn publish(&self, job: &Job) -> Result<bool, PublisherError> {
        let span = tracing::info_span!("publisher.publish", key = %self.key, job = job.uuid());
        async {
            let start = std::time::Instant::now();
            let result = self.inner.publish(job).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(true) => tracing::info!(elapsed_ms, "published"),
                Ok(false) => tracing::warn!(elapsed_ms, "publish declined"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "publish failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
