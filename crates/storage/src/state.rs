// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized job table built from WAL operations

use crate::StoreError;
use jr_core::{Job, Operation};
use std::collections::HashMap;

/// Current view of every job, keyed by external identifier
#[derive(Debug, Default)]
pub struct MaterializedState {
    pub jobs: HashMap<String, Job>,
    last_id: u64,
}

impl MaterializedState {
    /// Get a job by uuid or unique prefix (like git commit hashes)
    pub fn get_job(&self, id: &str) -> Option<&Job> {
        self.find_job(id).ok()
    }

    /// Like [`get_job`](Self::get_job), but says why nothing was returned
    pub fn find_job(&self, id: &str) -> Result<&Job, StoreError> {
        if let Some(job) = self.jobs.get(id) {
            return Ok(job);
        }
        if id.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let mut matches = self.jobs.iter().filter(|(k, _)| k.starts_with(id));
        match (matches.next(), matches.count()) {
            (Some((_, job)), 0) => Ok(job),
            (Some(_), rest) => Err(StoreError::Ambiguous {
                prefix: id.to_string(),
                count: rest + 1,
            }),
            (None, _) => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// Compute the record an operation would produce, without applying it
    pub fn check(&self, op: &Operation) -> Result<Job, StoreError> {
        match op {
            Operation::JobCreate { job } => {
                if job.uuid().is_empty() {
                    return Err(StoreError::MissingUuid);
                }
                if self.jobs.contains_key(job.uuid()) {
                    return Err(StoreError::Duplicate(job.uuid().to_string()));
                }
                let mut job = job.clone();
                job.id = self.last_id + 1;
                Ok(job)
            }
            _ => {
                let uuid = op.uuid();
                let mut job = self
                    .jobs
                    .get(uuid)
                    .cloned()
                    .ok_or_else(|| StoreError::NotFound(uuid.to_string()))?;
                op.apply_to(&mut job)?;
                Ok(job)
            }
        }
    }

    /// Store a record produced by [`check`](Self::check)
    pub fn insert(&mut self, job: Job) {
        self.last_id = self.last_id.max(job.id);
        self.jobs.insert(job.uuid().to_string(), job);
    }

    /// Apply an operation to update the state
    pub fn apply(&mut self, op: &Operation) -> Result<Job, StoreError> {
        let job = self.check(op)?;
        self.insert(job.clone());
        Ok(job)
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
