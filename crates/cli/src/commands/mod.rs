// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod capabilities;
pub mod job;
pub mod run;

use crate::config::Config;
use crate::error::JrError;
use jr_storage::WalStore;

/// Open the job store under the configured state directory
pub fn open_store(config: &Config) -> Result<WalStore, JrError> {
    let path = config.wal_path();
    WalStore::open(&path).map_err(|e| JrError::store_unavailable(&path, e))
}
