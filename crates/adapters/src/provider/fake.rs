// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake provider for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Provider, ProviderError};
use async_trait::async_trait;
use jr_core::Job;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Recorded provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Process { uuid: String },
    Cancel,
}

/// How a fake provider's `process` behaves
#[derive(Debug, Clone)]
pub enum FakeBehavior {
    /// Set success and record the given result
    Succeed(Option<String>),
    /// Leave success false and record the given result
    Fail(Option<String>),
    /// Succeed with the payload as the result
    Echo,
    /// Sleep, then behave like `Echo`
    Sleep(Duration),
    /// Return an error from `process`
    Error(String),
    /// Block until cancelled
    WaitForCancel,
    /// Block forever, ignoring cancellation
    Hang,
    /// Panic inside `process`
    Panic,
}

/// Fake provider for testing
///
/// Instances made with [`FakeProvider::instance`] share behavior and the call
/// log but each has its own result slot and cancel token.
#[derive(Debug)]
pub struct FakeProvider {
    behavior: Arc<Mutex<FakeBehavior>>,
    calls: Arc<Mutex<Vec<ProviderCall>>>,
    result: Mutex<Option<String>>,
    cancel: CancellationToken,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::new(FakeBehavior::Echo)
    }
}

impl FakeProvider {
    pub fn new(behavior: FakeBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            calls: Arc::new(Mutex::new(Vec::new())),
            result: Mutex::new(None),
            cancel: CancellationToken::new(),
        }
    }

    /// A fresh instance sharing this provider's behavior and call log
    pub fn instance(&self) -> Self {
        Self {
            behavior: Arc::clone(&self.behavior),
            calls: Arc::clone(&self.calls),
            result: Mutex::new(None),
            cancel: CancellationToken::new(),
        }
    }

    pub fn set_behavior(&self, behavior: FakeBehavior) {
        *self.behavior.lock().unwrap_or_else(|e| e.into_inner()) = behavior;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of `process` calls across all instances
    pub fn process_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ProviderCall::Process { .. }))
            .count()
    }

    fn record(&self, call: ProviderCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    fn set_result(&self, result: Option<String>) {
        *self.result.lock().unwrap_or_else(|e| e.into_inner()) = result;
    }
}

#[async_trait]
impl Provider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn process(&self, job: &mut Job) -> Result<(), ProviderError> {
        self.record(ProviderCall::Process {
            uuid: job.uuid().to_string(),
        });
        let behavior = self
            .behavior
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        match behavior {
            FakeBehavior::Succeed(result) => {
                self.set_result(result);
                job.success = true;
            }
            FakeBehavior::Fail(result) => {
                self.set_result(result);
                job.success = false;
            }
            FakeBehavior::Echo => {
                self.set_result(job.payload.clone());
                job.success = true;
            }
            FakeBehavior::Sleep(duration) => {
                tokio::time::sleep(duration).await;
                self.set_result(job.payload.clone());
                job.success = true;
            }
            FakeBehavior::Error(message) => return Err(ProviderError::Failed(message)),
            FakeBehavior::WaitForCancel => {
                self.cancel.cancelled().await;
                return Err(ProviderError::Cancelled);
            }
            FakeBehavior::Hang => std::future::pending::<()>().await,
            #[allow(clippy::panic)]
            FakeBehavior::Panic => panic!("fake provider panicked on {}", job.uuid()),
        }
        Ok(())
    }

    fn result(&self) -> Option<String> {
        self.result.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn cancel(&self) {
        self.record(ProviderCall::Cancel);
        self.cancel.cancel();
    }
}
