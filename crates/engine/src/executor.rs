// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job executor: runs one job from `STARTED` to `COMPLETED`
//!
//! The start and completion of a run are separate store transactions. The
//! completion commit happens on every path that got past the start commit,
//! whatever the provider did, so a job never stays `STARTED`.

use jr_adapters::{CapabilityRegistry, Provider, ProviderError, TracedProvider};
use jr_core::{Clock, EventBus, Job, JobEvent, Operation};
use jr_storage::{JobStore, StoreError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tracing::Instrument;

/// Errors that end a run without completing the job
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("invalid job {uuid:?}: missing {missing}")]
    InvalidJob { uuid: String, missing: &'static str },
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// State shared between a running executor and its handles
struct Shared {
    uuid: String,
    provider: Mutex<Option<Arc<TracedProvider>>>,
    executing: AtomicBool,
    done: watch::Sender<bool>,
}

/// Marks the run done when dropped, including on panic
struct DoneGuard<'a>(&'a Shared);

impl Drop for DoneGuard<'_> {
    fn drop(&mut self) {
        self.0.executing.store(false, Ordering::SeqCst);
        self.0.done.send_replace(true);
    }
}

/// Handle to observe and cancel a run from another task
#[derive(Clone)]
pub struct ExecutorHandle {
    shared: Arc<Shared>,
}

impl ExecutorHandle {
    pub fn uuid(&self) -> &str {
        &self.shared.uuid
    }

    /// Wait until the run has finished
    pub async fn wait_for(&self) {
        let mut done = self.shared.done.subscribe();
        // sender lives in `shared`, so the channel cannot close under us
        let _ = done.wait_for(|finished| *finished).await;
    }

    pub fn is_done(&self) -> bool {
        *self.shared.done.borrow()
    }

    /// Whether the run is between its start and completion commits
    pub fn is_executing(&self) -> bool {
        self.shared.executing.load(Ordering::SeqCst)
    }

    /// Forward a cancel request to the active provider, if one exists
    pub fn cancel(&self) {
        let provider = self
            .shared
            .provider
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        match provider {
            Some(provider) => provider.cancel(),
            None => tracing::debug!(job = %self.shared.uuid, "cancel before provider resolved"),
        }
    }
}

/// What the provider phase produced
struct Outcome {
    success: bool,
    result: Option<String>,
    message: Option<String>,
}

impl Outcome {
    fn failed(result: Option<String>, message: String) -> Self {
        Self {
            success: false,
            result,
            message: Some(message),
        }
    }
}

/// Runs a single job through its provider
pub struct JobExecutor<S, C> {
    job: Job,
    store: S,
    registry: Arc<CapabilityRegistry>,
    bus: EventBus,
    clock: C,
    timeout: Option<Duration>,
    shared: Arc<Shared>,
}

impl<S, C> JobExecutor<S, C>
where
    S: JobStore,
    C: Clock,
{
    pub fn new(
        job: Job,
        store: S,
        registry: Arc<CapabilityRegistry>,
        bus: EventBus,
        clock: C,
    ) -> Self {
        let (done, _) = watch::channel(false);
        let shared = Arc::new(Shared {
            uuid: job.uuid().to_string(),
            provider: Mutex::new(None),
            executing: AtomicBool::new(false),
            done,
        });
        Self {
            job,
            store,
            registry,
            bus,
            clock,
            timeout: None,
            shared,
        }
    }

    /// Hard deadline for the provider; on expiry the provider is cancelled,
    /// its task aborted and the job completed as unsuccessful
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn handle(&self) -> ExecutorHandle {
        ExecutorHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Check that a job carries what a run needs
    pub fn validate(job: &Job) -> Result<(), ExecuteError> {
        let missing = if job.uuid().is_empty() {
            "uuid"
        } else if job.payload.is_none() {
            "payload"
        } else {
            return Ok(());
        };
        Err(ExecuteError::InvalidJob {
            uuid: job.uuid().to_string(),
            missing,
        })
    }

    /// Run the job to `COMPLETED` and emit `job:completed`
    ///
    /// Returns the completed record. An invalid job is rejected before the
    /// store is touched.
    pub async fn run(self) -> Result<Job, ExecuteError> {
        let _done = DoneGuard(&self.shared);
        Self::validate(&self.job)?;

        let span = tracing::info_span!(
            "job.run",
            job = %self.shared.uuid,
            provider = %self.job.provider
        );
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&self) -> Result<Job, ExecuteError> {
        let uuid = self.shared.uuid.clone();
        self.shared.executing.store(true, Ordering::SeqCst);

        let started = self.store.commit(Operation::JobStart {
            uuid: uuid.clone(),
            at: self.clock.now(),
        })?;
        tracing::info!("job started");

        let outcome = self.invoke(started).await;

        let completed = self.store.commit(Operation::JobComplete {
            uuid: uuid.clone(),
            at: self.clock.now(),
            success: outcome.success,
            result: outcome.result,
            message: outcome.message,
        })?;
        tracing::info!(success = completed.success, "job completed");

        self.bus.publish(JobEvent::completed(
            uuid,
            completed.result().map(str::to_string),
        ));
        Ok(completed)
    }

    async fn invoke(&self, mut job: Job) -> Outcome {
        let key = job.provider.clone();
        let provider = match self.registry.resolve_provider(&key) {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                tracing::error!(error = %e, "cannot resolve provider");
                return Outcome::failed(None, e.to_string());
            }
        };
        *self
            .shared
            .provider
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(Arc::clone(&provider));

        job.success = false;
        let worker = Arc::clone(&provider);
        let mut task = tokio::spawn(
            async move {
                let result = worker.process(&mut job).await;
                (job.success, result)
            }
            .in_current_span(),
        );

        let joined = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, &mut task).await {
                Ok(joined) => joined,
                Err(_) => {
                    tracing::warn!(timeout_ms = limit.as_millis() as u64, "provider timed out");
                    provider.cancel();
                    task.abort();
                    return Outcome::failed(
                        provider.result(),
                        format!("provider {key} timed out after {limit:?}"),
                    );
                }
            },
            None => task.await,
        };

        match joined {
            Ok((success, Ok(()))) => Outcome {
                success,
                result: provider.result(),
                message: None,
            },
            Ok((success, Err(ProviderError::Cancelled))) => Outcome {
                success,
                result: provider.result(),
                message: Some(format!("provider {key} cancelled")),
            },
            Ok((_, Err(e))) => {
                tracing::error!(error = %e, "provider failed");
                Outcome::failed(provider.result(), format!("provider {key} failed: {e}"))
            }
            Err(e) => {
                tracing::error!(error = %e, "provider task failed");
                let reason = if e.is_panic() { "panicked" } else { "was aborted" };
                Outcome::failed(None, format!("provider {key} {reason}"))
            }
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
