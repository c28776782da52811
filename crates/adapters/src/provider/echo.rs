// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provider that returns the payload as its result

use super::{Provider, ProviderError};
use async_trait::async_trait;
use jr_core::Job;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct EchoProvider {
    result: Mutex<Option<String>>,
}

impl EchoProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Provider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn process(&self, job: &mut Job) -> Result<(), ProviderError> {
        let payload = job
            .payload
            .clone()
            .ok_or_else(|| ProviderError::MissingPayload(job.uuid().to_string()))?;
        *self.result.lock().unwrap_or_else(|e| e.into_inner()) = Some(payload);
        job.success = true;
        Ok(())
    }

    fn result(&self) -> Option<String> {
        self.result.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn cancel(&self) {}
}
