// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Publisher that writes each job as `<dir>/<uuid>.json`

use super::{Publisher, PublisherError};
use async_trait::async_trait;
use jr_core::Job;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FilePublisher {
    dir: PathBuf,
}

impl FilePublisher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the job will be written to
    pub fn path_for(&self, job: &Job) -> PathBuf {
        self.dir.join(format!("{}.json", job.uuid()))
    }
}

#[async_trait]
impl Publisher for FilePublisher {
    fn name(&self) -> &str {
        "file"
    }

    async fn initialize(&self, job: &Job) -> Result<bool, PublisherError> {
        match tokio::fs::create_dir_all(&self.dir).await {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::warn!(
                    job = job.uuid(),
                    dir = %self.dir.display(),
                    error = %e,
                    "cannot create publish directory"
                );
                Ok(false)
            }
        }
    }

    async fn publish(&self, job: &Job) -> Result<bool, PublisherError> {
        let body = serde_json::to_vec_pretty(job)?;
        let path = self.path_for(job);
        tokio::fs::write(&path, body).await?;
        tracing::debug!(job = job.uuid(), path = %path.display(), "job written");
        Ok(true)
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
