// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event types carried on the event bus

use crate::State;
use serde::{Deserialize, Serialize};

/// Immutable messages exchanged between the executor, the publish worker and
/// downstream listeners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobEvent {
    /// Executor finished; the job is ready to publish
    Completed {
        uuid: String,
        result: Option<String>,
    },

    /// Publish progress: a new state, an informational message, or both
    Updated {
        uuid: String,
        state: Option<State>,
        message: Option<String>,
    },

    /// A state change has been committed to the store
    Transitioned { uuid: String, state: State },
}

impl JobEvent {
    pub fn completed(uuid: impl Into<String>, result: Option<String>) -> Self {
        JobEvent::Completed {
            uuid: uuid.into(),
            result,
        }
    }

    /// Update carrying only an informational message
    pub fn message(uuid: impl Into<String>, message: impl Into<String>) -> Self {
        JobEvent::Updated {
            uuid: uuid.into(),
            state: None,
            message: Some(message.into()),
        }
    }

    /// Update carrying a new state and optional diagnostic
    pub fn state(uuid: impl Into<String>, state: State, message: Option<String>) -> Self {
        JobEvent::Updated {
            uuid: uuid.into(),
            state: Some(state),
            message,
        }
    }

    /// Routing name used for subscription matching
    pub fn name(&self) -> &'static str {
        match self {
            JobEvent::Completed { .. } => "job:completed",
            JobEvent::Updated { .. } => "job:updated",
            JobEvent::Transitioned { .. } => "job:transitioned",
        }
    }

    pub fn uuid(&self) -> &str {
        match self {
            JobEvent::Completed { uuid, .. }
            | JobEvent::Updated { uuid, .. }
            | JobEvent::Transitioned { uuid, .. } => uuid,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
