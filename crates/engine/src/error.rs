// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine runtime

use crate::ExecuteError;
use jr_storage::StoreError;
use thiserror::Error;

/// Errors that can occur in the runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("execute error: {0}")]
    Execute(#[from] ExecuteError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("job is not running: {0}")]
    NotRunning(String),
    #[error("job run aborted: {0}")]
    Aborted(String),
    #[error("runtime is shut down")]
    ShutDown,
}
