// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provider that runs the payload as a shell command
//!
//! Success is a zero exit status; the result is the captured stdout.
//! Cancelling kills the child process.

use super::{Provider, ProviderError};
use async_trait::async_trait;
use jr_core::Job;
use std::process::Stdio;
use std::sync::Mutex;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct ShellProvider {
    result: Mutex<Option<String>>,
    cancel: CancellationToken,
}

impl ShellProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

async fn read_all<R: AsyncRead + Unpin>(reader: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut reader) = reader {
        reader.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

#[async_trait]
impl Provider for ShellProvider {
    fn name(&self) -> &str {
        "shell"
    }

    async fn process(&self, job: &mut Job) -> Result<(), ProviderError> {
        let command = job
            .payload
            .clone()
            .ok_or_else(|| ProviderError::MissingPayload(job.uuid().to_string()))?;

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let finished = async {
            tokio::join!(child.wait(), read_all(stdout), read_all(stderr))
        };

        let (status, stdout, stderr) = tokio::select! {
            output = finished => output,
            _ = self.cancel.cancelled() => {
                // child is killed when dropped
                tracing::info!(job = job.uuid(), "shell command cancelled");
                return Err(ProviderError::Cancelled);
            }
        };

        let status = status?;
        let stdout = String::from_utf8_lossy(&stdout?).into_owned();
        let stderr = stderr?;
        if !stderr.is_empty() {
            tracing::warn!(
                job = job.uuid(),
                stderr = %String::from_utf8_lossy(&stderr),
                "shell stderr"
            );
        }

        tracing::debug!(job = job.uuid(), exit_code = ?status.code(), "shell command exited");
        *self.result.lock().unwrap_or_else(|e| e.into_inner()) = Some(stdout);
        job.success = status.success();
        Ok(())
    }

    fn result(&self) -> Option<String> {
        self.result.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn cancel(&self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
