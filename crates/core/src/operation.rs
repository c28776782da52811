// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operations for the write-ahead log
//!
//! Each operation is one transaction against a single job record.

use crate::{Job, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operations that can be persisted to the WAL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Insert a new job record
    JobCreate { job: Job },

    /// Execution began
    JobStart { uuid: String, at: DateTime<Utc> },

    /// Execution finished, with the provider outcome
    JobComplete {
        uuid: String,
        at: DateTime<Utc>,
        success: bool,
        result: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },

    /// Publish-phase state change and/or diagnostic message
    JobUpdate {
        uuid: String,
        state: Option<State>,
        message: Option<String>,
    },
}

impl Operation {
    /// External identifier of the job this operation targets
    pub fn uuid(&self) -> &str {
        match self {
            Operation::JobCreate { job } => job.uuid(),
            Operation::JobStart { uuid, .. }
            | Operation::JobComplete { uuid, .. }
            | Operation::JobUpdate { uuid, .. } => uuid,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::JobCreate { .. } => "job_create",
            Operation::JobStart { .. } => "job_start",
            Operation::JobComplete { .. } => "job_complete",
            Operation::JobUpdate { .. } => "job_update",
        }
    }

    /// Apply this operation to a record, leaving it untouched on error
    pub fn apply_to(&self, job: &mut Job) -> Result<(), crate::TransitionError> {
        let mut next = job.clone();
        match self {
            Operation::JobCreate { .. } => {
                return Err(crate::TransitionError::AlreadySet {
                    uuid: job.uuid().to_string(),
                    field: "uuid",
                })
            }
            Operation::JobStart { at, .. } => next.begin(*at)?,
            Operation::JobComplete {
                at,
                success,
                result,
                message,
                ..
            } => {
                next.complete(*at, *success, result.clone())?;
                if let Some(message) = message {
                    next.push_message(message.clone());
                }
            }
            Operation::JobUpdate { state, message, .. } => {
                if let Some(state) = state {
                    next.transition(*state)?;
                }
                if let Some(message) = message {
                    next.push_message(message.clone());
                }
            }
        }
        *job = next;
        Ok(())
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
