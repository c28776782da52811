// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for engine tests

use jr_adapters::{CapabilityRegistry, FakeBehavior, FakeProvider, FakePublisher};
use jr_core::{Clock, EventReceiver, Job, JobEvent, Operation, SystemClock};
use jr_storage::{JobStore, StoreError, WalStore};
use std::time::Duration;

/// Registry exposing `fake` as a provider and `fake-pub` as a publisher
pub fn fake_registry(provider: &FakeProvider, publisher: &FakePublisher) -> CapabilityRegistry {
    let mut registry = CapabilityRegistry::new();
    let provider = provider.instance();
    registry.register_provider("fake", move || Ok(provider.instance()));
    let publisher = publisher.clone();
    registry.register_publisher("fake-pub", move || Ok(publisher.clone()));
    registry
}

pub fn provider(behavior: FakeBehavior) -> FakeProvider {
    FakeProvider::new(behavior)
}

pub fn job(uuid: &str) -> Job {
    Job::new(uuid, format!("job {uuid}"), "fake", SystemClock.now()).with_payload(uuid)
}

/// Store a job as `CREATED`
pub fn create(store: &impl JobStore, job: Job) -> Job {
    store.commit(Operation::JobCreate { job }).unwrap()
}

/// Next event, failing the test if none arrives promptly
pub async fn next_event(events: &mut EventReceiver) -> JobEvent {
    tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("timed out waiting for event")
        .expect("bus closed")
}

/// Assert no further event arrives within a short window
pub async fn assert_quiet(events: &mut EventReceiver) {
    let extra = tokio::time::timeout(Duration::from_millis(100), events.recv()).await;
    assert!(extra.is_err(), "unexpected event: {extra:?}");
}

/// Store that rejects one kind of operation as unavailable
#[derive(Clone)]
pub struct FailingStore {
    inner: WalStore,
    fail_on: &'static str,
}

impl FailingStore {
    pub fn new(fail_on: &'static str) -> Self {
        Self {
            inner: WalStore::in_memory(),
            fail_on,
        }
    }
}

impl JobStore for FailingStore {
    fn commit(&self, op: Operation) -> Result<Job, StoreError> {
        if op.name() == self.fail_on {
            return Err(StoreError::Unavailable("disk detached".to_string()));
        }
        self.inner.commit(op)
    }

    fn load(&self, uuid: &str) -> Result<Job, StoreError> {
        self.inner.load(uuid)
    }

    fn find(&self, prefix: &str) -> Result<Job, StoreError> {
        self.inner.find(prefix)
    }

    fn list(&self) -> Result<Vec<Job>, StoreError> {
        self.inner.list()
    }
}
