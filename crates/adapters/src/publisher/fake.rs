// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake publisher for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Publisher, PublisherError};
use async_trait::async_trait;
use jr_core::Job;
use std::sync::{Arc, Mutex};

/// Recorded publisher call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublisherCall {
    Initialize { uuid: String },
    Publish { uuid: String },
}

/// Configured answer for one publisher method
#[derive(Debug, Clone)]
enum Outcome {
    Accept,
    Decline,
    Error(String),
}

impl Outcome {
    fn answer(&self) -> Result<bool, PublisherError> {
        match self {
            Outcome::Accept => Ok(true),
            Outcome::Decline => Ok(false),
            Outcome::Error(msg) => Err(PublisherError::Failed(msg.clone())),
        }
    }
}

/// Fake publisher for testing
///
/// Clones share configuration and the call log.
#[derive(Debug, Clone)]
pub struct FakePublisher {
    name: String,
    initialize: Arc<Mutex<Outcome>>,
    publish: Arc<Mutex<Outcome>>,
    calls: Arc<Mutex<Vec<PublisherCall>>>,
}

impl Default for FakePublisher {
    fn default() -> Self {
        Self::new("fake")
    }
}

impl FakePublisher {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initialize: Arc::new(Mutex::new(Outcome::Accept)),
            publish: Arc::new(Mutex::new(Outcome::Accept)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make `initialize` return `Ok(false)`
    pub fn decline_initialize(&self) {
        *self.initialize.lock().unwrap_or_else(|e| e.into_inner()) = Outcome::Decline;
    }

    /// Make `initialize` return an error
    pub fn fail_initialize(&self, message: impl Into<String>) {
        *self.initialize.lock().unwrap_or_else(|e| e.into_inner()) =
            Outcome::Error(message.into());
    }

    /// Make `publish` return `Ok(false)`
    pub fn decline_publish(&self) {
        *self.publish.lock().unwrap_or_else(|e| e.into_inner()) = Outcome::Decline;
    }

    /// Make `publish` return an error
    pub fn fail_publish(&self, message: impl Into<String>) {
        *self.publish.lock().unwrap_or_else(|e| e.into_inner()) = Outcome::Error(message.into());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<PublisherCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Uuids passed to `publish`, in call order
    pub fn published(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                PublisherCall::Publish { uuid } => Some(uuid),
                PublisherCall::Initialize { .. } => None,
            })
            .collect()
    }

    fn record(&self, call: PublisherCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

#[async_trait]
impl Publisher for FakePublisher {
    fn name(&self) -> &str {
        &self.name
    }

    async fn initialize(&self, job: &Job) -> Result<bool, PublisherError> {
        self.record(PublisherCall::Initialize {
            uuid: job.uuid().to_string(),
        });
        self.initialize
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .answer()
    }

    async fn publish(&self, job: &Job) -> Result<bool, PublisherError> {
        self.record(PublisherCall::Publish {
            uuid: job.uuid().to_string(),
        });
        self.publish
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .answer()
    }
}
