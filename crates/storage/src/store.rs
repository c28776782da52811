// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transactional job store
//!
//! A commit validates the operation against the current record, appends it to
//! the WAL, and only then makes the new record visible. Any failure along the
//! way leaves the stored record exactly as it was and surfaces the error.

use crate::{MaterializedState, Wal, WalError};
use jr_core::{Job, Operation, TransitionError};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("job not found: {0}")]
    NotFound(String),
    #[error("job already exists: {0}")]
    Duplicate(String),
    #[error("job has no uuid")]
    MissingUuid,
    #[error("prefix {prefix:?} matches {count} jobs")]
    Ambiguous { prefix: String, count: usize },
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("wal error: {0}")]
    Wal(#[from] WalError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence contract used by the executor and workers
pub trait JobStore: Clone + Send + Sync + 'static {
    /// Apply one operation as a single transaction, returning the new record
    fn commit(&self, op: Operation) -> Result<Job, StoreError>;

    /// Load a job by exact uuid
    fn load(&self, uuid: &str) -> Result<Job, StoreError>;

    /// Load a job by uuid or unique prefix
    fn find(&self, prefix: &str) -> Result<Job, StoreError>;

    /// All jobs, ordered by store id
    fn list(&self) -> Result<Vec<Job>, StoreError>;
}

struct Inner {
    wal: Option<Wal>,
    state: MaterializedState,
}

/// WAL-backed job store
#[derive(Clone)]
pub struct WalStore {
    inner: Arc<Mutex<Inner>>,
}

impl WalStore {
    /// Open the WAL at `path`, replaying it into memory
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let mut state = MaterializedState::default();
        let ops = Wal::replay(path)?;
        let replayed = ops.len();
        for op in &ops {
            if let Err(e) = state.apply(op) {
                tracing::warn!(op = op.name(), job = op.uuid(), error = %e, "skipping WAL entry");
            }
        }
        let wal = Wal::open(path)?;
        tracing::debug!(path = %path.display(), replayed, jobs = state.jobs.len(), "store opened");

        Ok(Self::from_parts(Some(wal), state))
    }

    /// Store without durability, for tests and one-shot runs
    pub fn in_memory() -> Self {
        Self::from_parts(None, MaterializedState::default())
    }

    fn from_parts(wal: Option<Wal>, state: MaterializedState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { wal, state })),
        }
    }

    /// Number of operations durably written (0 for in-memory stores)
    pub fn sequence(&self) -> u64 {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.wal.as_ref().map_or(0, Wal::sequence)
    }
}

impl JobStore for WalStore {
    fn commit(&self, op: Operation) -> Result<Job, StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        let job = inner.state.check(&op)?;
        if let Some(wal) = inner.wal.as_mut() {
            wal.append(&op)?;
        }
        inner.state.insert(job.clone());

        tracing::trace!(op = op.name(), job = job.uuid(), state = %job.state(), "committed");
        Ok(job)
    }

    fn load(&self, uuid: &str) -> Result<Job, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner
            .state
            .jobs
            .get(uuid)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(uuid.to_string()))
    }

    fn find(&self, prefix: &str) -> Result<Job, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.state.find_job(prefix).cloned()
    }

    fn list(&self) -> Result<Vec<Job>, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let mut jobs: Vec<Job> = inner.state.jobs.values().cloned().collect();
        jobs.sort_by_key(|job| job.id);
        Ok(jobs)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
