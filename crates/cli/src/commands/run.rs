// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jr run`: create a job and drive it through the pipeline

use super::open_store;
use crate::config::Config;
use crate::error::JrError;
use crate::output::{self, JobDetail, OutputFormat};
use clap::Args;
use jr_core::{EventBus, State, SystemClock, UuidIdGen};
use jr_engine::{Runtime, RuntimeConfig};
use std::process::ExitCode;

/// Exit status for a job that ran but did not succeed
pub const JOB_FAILED: u8 = 2;

#[derive(Args)]
pub struct RunArgs {
    /// Job name
    #[arg(long)]
    pub name: String,
    /// Provider capability key (see `jr capabilities`)
    #[arg(long)]
    pub provider: String,
    /// Publisher capability key
    #[arg(long)]
    pub publisher: Option<String>,
    /// Opaque payload handed to the provider
    #[arg(long)]
    pub payload: Option<String>,
    /// Principal recorded as having started the job
    #[arg(long)]
    pub started_by: Option<String>,
}

pub async fn handle(
    args: RunArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<ExitCode, JrError> {
    let runtime = Runtime::new(
        open_store(config)?,
        config.registry(),
        EventBus::new(),
        SystemClock,
        UuidIdGen,
        RuntimeConfig {
            timeout: config.executor.timeout,
        },
    );
    runtime.start();

    let mut job = runtime.job(args.name, args.provider);
    job.publisher = args.publisher;
    job.payload = args.payload;
    job.started_by = args.started_by;
    let uuid = job.uuid().to_string();

    let settle = runtime.run_to_settled(job);
    tokio::pin!(settle);
    let settled = tokio::select! {
        settled = &mut settle => settled,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!(job = %uuid, "interrupted, cancelling");
            eprintln!("Interrupted, cancelling job {}", uuid);
            if let Err(e) = runtime.cancel(&uuid) {
                tracing::debug!(error = %e, "cancel after completion");
            }
            settle.await
        }
    };
    runtime.shutdown().await;

    let job = settled?;
    output::print(&JobDetail::new(&job), format);

    if job.success && job.state() != State::Failed {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(JOB_FAILED))
    }
}
