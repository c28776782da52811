// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File logging under the state directory

use crate::error::JrError;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

/// Install the global subscriber writing to `log_path`
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Keep the guard
/// alive until exit so buffered lines are flushed.
pub fn setup_logging(log_path: &Path) -> Result<WorkerGuard, JrError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (Some(dir), Some(file)) = (log_path.parent(), log_path.file_name()) else {
        return Err(JrError::new(format!(
            "Invalid log path '{}'",
            log_path.display()
        )));
    };
    std::fs::create_dir_all(dir).map_err(|e| {
        JrError::new(format!("Cannot create state directory '{}'", dir.display()))
            .with_context(e.to_string())
            .with_suggestion("Point elsewhere with: jr --state-dir <DIR> ...")
            .with_source(e)
    })?;

    let file_appender = tracing_appender::rolling::never(dir, file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}
