// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job record
//!
//! A job is one unit of work: which provider runs it, which publisher reports
//! it, an opaque payload, and the lifecycle timestamps and outcome recorded by
//! the executor and publish worker. Lifecycle fields are only reachable
//! through the transition methods so a record can never regress.

use crate::state::{State, TransitionError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Process-local identifier, assigned by the store
    #[serde(default)]
    pub id: u64,
    uuid: String,
    pub name: String,
    /// Capability key of the provider that runs this job
    pub provider: String,
    /// Capability key of the publisher that reports this job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Set by the provider during `process`
    #[serde(default)]
    pub success: bool,
    /// Principal that initiated the job, copied through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_by: Option<String>,
    state: State,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    started: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    messages: Vec<String>,
}

impl Job {
    /// Create a job in the `CREATED` state
    pub fn new(
        uuid: impl Into<String>,
        name: impl Into<String>,
        provider: impl Into<String>,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            uuid: uuid.into(),
            name: name.into(),
            provider: provider.into(),
            publisher: None,
            payload: None,
            success: false,
            started_by: None,
            state: State::Created,
            result: None,
            created: Some(created),
            started: None,
            completed: None,
            messages: Vec::new(),
        }
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn started_by(mut self, principal: impl Into<String>) -> Self {
        self.started_by = Some(principal.into());
        self
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    pub fn started(&self) -> Option<DateTime<Utc>> {
        self.started
    }

    pub fn completed(&self) -> Option<DateTime<Utc>> {
        self.completed
    }

    /// Diagnostic messages accumulated over the lifecycle
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Time from creation to completion, if both are known and ordered
    pub fn duration(&self) -> Option<Duration> {
        match (self.created, self.completed) {
            (Some(created), Some(completed)) if completed > created => Some(completed - created),
            _ => None,
        }
    }

    /// Whether the executor has enough to run this job
    pub fn is_runnable(&self) -> bool {
        !self.uuid.is_empty() && self.payload.is_some()
    }

    /// Record that execution began
    ///
    /// A `STARTED` record may be begun again (the timestamp is refreshed);
    /// anything past `STARTED` is rejected.
    pub fn begin(&mut self, at: DateTime<Utc>) -> Result<(), TransitionError> {
        match self.state {
            State::Created | State::Started => {
                self.state = State::Started;
                self.started = Some(at);
                Ok(())
            }
            from => Err(self.illegal(from, State::Started)),
        }
    }

    /// Record the provider outcome and move to `COMPLETED`
    pub fn complete(
        &mut self,
        at: DateTime<Utc>,
        success: bool,
        result: Option<String>,
    ) -> Result<(), TransitionError> {
        if self.completed.is_some() {
            return Err(TransitionError::AlreadySet {
                uuid: self.uuid.clone(),
                field: "completed",
            });
        }
        let Some(started) = self.started else {
            return Err(TransitionError::NotStarted {
                uuid: self.uuid.clone(),
            });
        };
        if !self.state.can_transition_to(State::Completed) {
            return Err(self.illegal(self.state, State::Completed));
        }

        self.state = State::Completed;
        self.completed = Some(at.max(started));
        self.success = success;
        self.result = result;
        Ok(())
    }

    /// Move along a lifecycle edge that carries no extra data
    pub fn transition(&mut self, next: State) -> Result<(), TransitionError> {
        match next {
            State::Started | State::Completed => Err(self.illegal(self.state, next)),
            _ if self.state.can_transition_to(next) => {
                self.state = next;
                Ok(())
            }
            _ => Err(self.illegal(self.state, next)),
        }
    }

    pub fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    fn illegal(&self, from: State, to: State) -> TransitionError {
        TransitionError::Illegal {
            uuid: self.uuid.clone(),
            from,
            to,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
