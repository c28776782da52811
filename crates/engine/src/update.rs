// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Update worker: commits `job:updated` events to the store
//!
//! Updates are applied in arrival order on a single task. An update whose
//! state edge is illegal (a duplicate or late delivery) is dropped with a
//! warning. Each committed state change is announced as `job:transitioned`.

use jr_core::{EventBus, EventReceiver, JobEvent, Operation, SubscriberId, Subscription};
use jr_storage::{JobStore, StoreError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct UpdateWorker<S> {
    store: S,
    bus: EventBus,
}

impl<S: JobStore> UpdateWorker<S> {
    pub const SUBSCRIBER: &'static str = "update-worker";

    pub fn new(store: S, bus: EventBus) -> Self {
        Self { store, bus }
    }

    /// Subscribe to updates and apply them until `shutdown` fires
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        let events = self
            .bus
            .subscribe(Subscription::to(Self::SUBSCRIBER, "job:updated"));
        tokio::spawn(self.run(events, shutdown))
    }

    async fn run(self, mut events: EventReceiver, shutdown: CancellationToken) {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                event = events.recv() => match event {
                    Some(event) => self.handle(event),
                    None => break,
                },
            }
        }
        self.bus
            .unsubscribe(&SubscriberId(Self::SUBSCRIBER.to_string()));
    }

    /// Apply one update event
    pub fn handle(&self, event: JobEvent) {
        let JobEvent::Updated {
            uuid,
            state,
            message,
        } = event
        else {
            return;
        };

        let op = Operation::JobUpdate {
            uuid: uuid.clone(),
            state,
            message,
        };
        match self.store.commit(op) {
            Ok(job) => {
                tracing::debug!(job = %uuid, state = %job.state(), "update applied");
                if let Some(state) = state {
                    self.bus.publish(JobEvent::Transitioned { uuid, state });
                }
            }
            Err(StoreError::Transition(e)) => {
                tracing::warn!(job = %uuid, error = %e, "ignoring out-of-order update");
            }
            Err(e) => {
                tracing::error!(job = %uuid, error = %e, "failed to apply update");
            }
        }
    }
}

#[cfg(test)]
#[path = "update_tests.rs"]
mod tests;
