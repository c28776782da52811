// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle state machine
//!
//! ```text
//! CREATED   -> STARTED
//! STARTED   -> COMPLETED
//! COMPLETED -> PUBLISHED
//! COMPLETED -> FAILED
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    /// Record exists, execution has not begun
    Created,
    /// Executor has begun running the provider
    Started,
    /// Provider finished, successfully or not
    Completed,
    /// Publisher reported the result
    Published,
    /// Publishing could not start or did not succeed
    Failed,
}

impl State {
    pub const ALL: [State; 5] = [
        State::Created,
        State::Started,
        State::Completed,
        State::Published,
        State::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            State::Created => "CREATED",
            State::Started => "STARTED",
            State::Completed => "COMPLETED",
            State::Published => "PUBLISHED",
            State::Failed => "FAILED",
        }
    }

    /// Whether `self -> next` is an edge of the lifecycle graph
    pub fn can_transition_to(&self, next: State) -> bool {
        matches!(
            (self, next),
            (State::Created, State::Started)
                | (State::Started, State::Completed)
                | (State::Completed, State::Published)
                | (State::Completed, State::Failed)
        )
    }

    /// No outgoing edges
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Published | State::Failed)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored state string outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown job state: {0:?}")]
pub struct UnknownStateError(pub String);

impl FromStr for State {
    type Err = UnknownStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| UnknownStateError(s.to_string()))
    }
}

/// Rejected lifecycle change
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("job {uuid}: illegal transition {from} -> {to}")]
    Illegal { uuid: String, from: State, to: State },
    #[error("job {uuid}: {field} already set")]
    AlreadySet { uuid: String, field: &'static str },
    #[error("job {uuid}: cannot complete before it has started")]
    NotStarted { uuid: String },
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
