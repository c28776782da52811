// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Publish worker: turns `job:completed` into publisher calls
//!
//! Every outcome is reported as a `job:updated` event; the worker never
//! writes the job record itself and never lets a fault escape.

use jr_adapters::{CapabilityRegistry, Publisher, PublisherError, ResolveError};
use jr_core::{EventBus, EventReceiver, JobEvent, State, SubscriberId, Subscription};
use jr_storage::{JobStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Faults converted into a `FAILED` update
#[derive(Debug, Error)]
enum PublishError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Publisher(#[from] PublisherError),
}

#[derive(Clone)]
pub struct PublishWorker<S> {
    store: S,
    registry: Arc<CapabilityRegistry>,
    bus: EventBus,
}

impl<S: JobStore> PublishWorker<S> {
    pub const SUBSCRIBER: &'static str = "publish-worker";

    pub fn new(store: S, registry: Arc<CapabilityRegistry>, bus: EventBus) -> Self {
        Self {
            store,
            registry,
            bus,
        }
    }

    /// Subscribe to completions and process them until `shutdown` fires
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        let events = self
            .bus
            .subscribe(Subscription::to(Self::SUBSCRIBER, "job:completed"));
        tokio::spawn(self.run(events, shutdown))
    }

    async fn run(self, mut events: EventReceiver, shutdown: CancellationToken) {
        tracing::debug!("publish worker started");
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                event = events.recv() => match event {
                    Some(event) => self.dispatch(event),
                    None => break,
                },
            }
        }
        self.bus
            .unsubscribe(&SubscriberId(Self::SUBSCRIBER.to_string()));
        tracing::debug!("publish worker stopped");
    }

    /// Handle each completion on its own task; a panicking publisher is
    /// reported as `FAILED`
    fn dispatch(&self, event: JobEvent) {
        let JobEvent::Completed { uuid, .. } = event else {
            return;
        };
        let worker = self.clone();
        let span = tracing::info_span!("job.publish", job = %uuid);
        let task = {
            let uuid = uuid.clone();
            tokio::spawn(async move { worker.handle(&uuid).await }.instrument(span))
        };

        let bus = self.bus.clone();
        tokio::spawn(async move {
            if let Err(e) = task.await {
                tracing::error!(job = %uuid, error = %e, "publish task failed");
                bus.publish(JobEvent::state(
                    uuid,
                    State::Failed,
                    Some(format!("publisher task failed: {e}")),
                ));
            }
        });
    }

    /// Publish one completed job, reporting progress on the bus
    pub async fn handle(&self, uuid: &str) {
        if let Err(e) = self.publish(uuid).await {
            tracing::error!(error = %e, "publish failed");
            self.bus
                .publish(JobEvent::state(uuid, State::Failed, Some(e.to_string())));
        }
    }

    async fn publish(&self, uuid: &str) -> Result<(), PublishError> {
        let job = self.store.load(uuid)?;
        // Duplicate or early completions must not reach the publisher
        if job.state() != State::Completed {
            tracing::debug!(state = %job.state(), "job is not completed, skipping");
            return Ok(());
        }
        // Left COMPLETED rather than reported FAILED: nothing to publish to
        let Some(key) = job.publisher.as_deref() else {
            tracing::debug!("no publisher configured");
            return Ok(());
        };

        let publisher = self.registry.resolve_publisher(key)?;
        let name = publisher.name().to_string();

        if !publisher.initialize(&job).await? {
            self.bus.publish(JobEvent::state(
                uuid,
                State::Failed,
                Some(format!("Unable to initialize {name}")),
            ));
            return Ok(());
        }
        self.bus
            .publish(JobEvent::message(uuid, format!("Initialized {name}")));

        let state = if publisher.publish(&job).await? {
            State::Published
        } else {
            State::Failed
        };
        self.bus.publish(JobEvent::state(uuid, state, None));
        Ok(())
    }
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
