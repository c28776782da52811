// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Publisher that writes the job outcome to the log

use super::{Publisher, PublisherError};
use async_trait::async_trait;
use jr_core::Job;

#[derive(Debug, Default, Clone, Copy)]
pub struct LogPublisher;

#[async_trait]
impl Publisher for LogPublisher {
    fn name(&self) -> &str {
        "log"
    }

    async fn initialize(&self, _job: &Job) -> Result<bool, PublisherError> {
        Ok(true)
    }

    async fn publish(&self, job: &Job) -> Result<bool, PublisherError> {
        tracing::info!(
            job = job.uuid(),
            name = %job.name,
            success = job.success,
            result = job.result().unwrap_or_default(),
            "job published"
        );
        Ok(true)
    }
}
