// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime for the jobrelay engine
//!
//! Owns the store, registry, bus and clock, and wires the executor to the
//! publish and update workers. Constructed once and passed around; there is
//! no process-global instance.

use crate::{ExecuteError, ExecutorHandle, JobExecutor, PublishWorker, RuntimeError, UpdateWorker};
use jr_adapters::CapabilityRegistry;
use jr_core::{
    Clock, EventBus, EventReceiver, IdGen, Job, JobEvent, Operation, State, SubscriberId,
    Subscription,
};
use jr_storage::JobStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

type RunHandle = JoinHandle<Result<Job, ExecuteError>>;

/// Runtime behavior configuration
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Hard deadline for a provider's `process`
    pub timeout: Option<Duration>,
}

/// Runtime that coordinates the system
pub struct Runtime<S, C, I> {
    store: S,
    registry: Arc<CapabilityRegistry>,
    bus: EventBus,
    clock: C,
    id_gen: I,
    config: RuntimeConfig,
    /// Live executors, keyed by job uuid
    executors: Arc<Mutex<HashMap<String, ExecutorHandle>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    shutdown: CancellationToken,
}

impl<S, C, I> Runtime<S, C, I>
where
    S: JobStore,
    C: Clock,
    I: IdGen,
{
    pub fn new(
        store: S,
        registry: CapabilityRegistry,
        bus: EventBus,
        clock: C,
        id_gen: I,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            store,
            registry: Arc::new(registry),
            bus,
            clock,
            id_gen,
            config,
            executors: Arc::new(Mutex::new(HashMap::new())),
            workers: Mutex::new(Vec::new()),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Spawn the publish and update workers and the event log tap
    pub fn start(&self) {
        let publish = PublishWorker::new(
            self.store.clone(),
            Arc::clone(&self.registry),
            self.bus.clone(),
        )
        .spawn(self.shutdown.child_token());
        let update = UpdateWorker::new(self.store.clone(), self.bus.clone())
            .spawn(self.shutdown.child_token());
        let tap = self.spawn_event_log();

        let mut workers = self.workers.lock().unwrap_or_else(|e| e.into_inner());
        workers.extend([publish, update, tap]);
        tracing::info!("runtime started");
    }

    fn spawn_event_log(&self) -> JoinHandle<()> {
        let mut events = self.bus.set_global_handler();
        let shutdown = self.shutdown.child_token();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    event = events.recv() => match event {
                        Some(event) => {
                            tracing::debug!(event = event.name(), job = event.uuid(), ?event, "event")
                        }
                        None => break,
                    },
                }
            }
        })
    }

    /// A new job record with a fresh uuid and creation time
    pub fn job(&self, name: impl Into<String>, provider: impl Into<String>) -> Job {
        Job::new(self.id_gen.next(), name, provider, self.clock.now())
    }

    /// Persist a new job and start its executor on a dedicated task
    ///
    /// Jobs without a uuid or payload are rejected before anything is stored.
    pub fn submit(&self, job: Job) -> Result<ExecutorHandle, RuntimeError> {
        let (handle, _run) = self.launch(job)?;
        Ok(handle)
    }

    fn launch(&self, job: Job) -> Result<(ExecutorHandle, RunHandle), RuntimeError> {
        if self.shutdown.is_cancelled() {
            return Err(RuntimeError::ShutDown);
        }
        JobExecutor::<S, C>::validate(&job)?;

        let job = self.store.commit(Operation::JobCreate { job })?;
        let uuid = job.uuid().to_string();
        tracing::info!(job = %uuid, id = job.id, name = %job.name, "job submitted");

        let executor = JobExecutor::new(
            job,
            self.store.clone(),
            Arc::clone(&self.registry),
            self.bus.clone(),
            self.clock.clone(),
        )
        .with_timeout(self.config.timeout);
        let handle = executor.handle();

        self.executors
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(uuid.clone(), handle.clone());

        let executors = Arc::clone(&self.executors);
        let run = tokio::spawn(async move {
            let result = executor.run().await;
            if let Err(e) = &result {
                tracing::error!(job = %uuid, error = %e, "job run failed");
            }
            executors
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .remove(&uuid);
            result
        });

        Ok((handle, run))
    }

    /// Ask the provider of a running job to stop
    pub fn cancel(&self, uuid: &str) -> Result<(), RuntimeError> {
        let handle = self
            .executors
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(uuid)
            .cloned()
            .ok_or_else(|| RuntimeError::NotRunning(uuid.to_string()))?;
        handle.cancel();
        Ok(())
    }

    /// Uuids of jobs whose executors have not finished
    pub fn running(&self) -> Vec<String> {
        let mut running: Vec<String> = self
            .executors
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        running.sort();
        running
    }

    /// Submit a job and wait until it will not change any further
    ///
    /// That is `PUBLISHED` or `FAILED`, or `COMPLETED` for a job without a
    /// publisher. Requires [`Runtime::start`] for jobs with a publisher.
    pub async fn run_to_settled(&self, job: Job) -> Result<Job, RuntimeError> {
        let uuid = job.uuid().to_string();
        let watcher = SubscriberId(format!("settle:{uuid}"));
        let mut transitions = self
            .bus
            .subscribe(Subscription::to(watcher.0.clone(), "job:transitioned"));

        let settled = self.settle(job, &uuid, &mut transitions).await;
        self.bus.unsubscribe(&watcher);
        settled
    }

    async fn settle(
        &self,
        job: Job,
        uuid: &str,
        transitions: &mut EventReceiver,
    ) -> Result<Job, RuntimeError> {
        let (_handle, run) = self.launch(job)?;
        match run.await {
            Ok(result) => result?,
            Err(e) => return Err(RuntimeError::Aborted(e.to_string())),
        };

        let job = self.store.load(uuid)?;
        if job.state() != State::Completed || job.publisher.is_none() {
            return Ok(job);
        }

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => return Err(RuntimeError::ShutDown),
                event = transitions.recv() => match event {
                    Some(JobEvent::Transitioned { uuid: ref id, state })
                        if id == uuid && state.is_terminal() => break,
                    Some(_) => continue,
                    None => return Err(RuntimeError::ShutDown),
                },
            }
        }
        Ok(self.store.load(uuid)?)
    }

    /// Stop the workers and wait for them to exit
    ///
    /// Running executors are left to finish; their completions are no longer
    /// published.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let workers: Vec<_> = self
            .workers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect();
        for worker in workers {
            if let Err(e) = worker.await {
                tracing::warn!(error = %e, "worker exited abnormally");
            }
        }
        tracing::info!(running = self.running().len(), "runtime stopped");
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
