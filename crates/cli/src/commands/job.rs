// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `jr list` and `jr show`

use super::open_store;
use crate::config::Config;
use crate::error::JrError;
use crate::output::{self, JobDetail, JobRow, OutputFormat, JOB_HEADER};
use jr_storage::JobStore;

pub fn list(config: &Config, format: OutputFormat) -> Result<(), JrError> {
    let jobs = open_store(config)?.list()?;
    let rows: Vec<JobRow<'_>> = jobs.iter().map(JobRow::new).collect();
    output::print_list(&rows, JOB_HEADER, "No jobs", format);
    Ok(())
}

pub fn show(prefix: &str, config: &Config, format: OutputFormat) -> Result<(), JrError> {
    let job = open_store(config)?.find(prefix)?;
    output::print(&JobDetail::new(&job), format);
    Ok(())
}
