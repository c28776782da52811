// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use jr_core::Job;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a list of items, with a header line in text mode
pub fn print_list<T: Serialize + fmt::Display>(
    items: &[T],
    header: &str,
    empty: &str,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Text if items.is_empty() => println!("{}", empty),
        OutputFormat::Text => {
            println!("{}", header);
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

/// Full view of one job
#[derive(Serialize)]
pub struct JobDetail<'a> {
    #[serde(flatten)]
    job: &'a Job,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<i64>,
}

impl<'a> JobDetail<'a> {
    pub fn new(job: &'a Job) -> Self {
        Self {
            job,
            duration_ms: job.duration().map(|d| d.num_milliseconds()),
        }
    }
}

impl fmt::Display for JobDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let job = self.job;
        writeln!(f, "Job: {}", job.uuid())?;
        writeln!(f, "  Id: {}", job.id)?;
        writeln!(f, "  Name: {}", job.name)?;
        writeln!(f, "  Provider: {}", job.provider)?;
        if let Some(publisher) = &job.publisher {
            writeln!(f, "  Publisher: {}", publisher)?;
        }
        if let Some(principal) = &job.started_by {
            writeln!(f, "  Started by: {}", principal)?;
        }
        writeln!(f, "  State: {}", job.state())?;
        writeln!(f, "  Success: {}", job.success)?;
        if let Some(result) = job.result() {
            writeln!(f, "  Result: {}", result.trim_end())?;
        }
        for (label, at) in [
            ("Created", job.created()),
            ("Started", job.started()),
            ("Completed", job.completed()),
        ] {
            if let Some(at) = at {
                writeln!(f, "  {}: {}", label, at.to_rfc3339())?;
            }
        }
        if let Some(ms) = self.duration_ms {
            writeln!(f, "  Duration: {}ms", ms)?;
        }
        if !job.messages().is_empty() {
            writeln!(f, "  Messages:")?;
            for message in job.messages() {
                writeln!(f, "    - {}", message)?;
            }
        }
        Ok(())
    }
}

pub const JOB_HEADER: &str = "ID    UUID          NAME                 PROVIDER   STATE";

/// One line of `jr list`
#[derive(Serialize)]
pub struct JobRow<'a>(&'a Job);

impl<'a> JobRow<'a> {
    pub fn new(job: &'a Job) -> Self {
        Self(job)
    }
}

impl fmt::Display for JobRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let job = self.0;
        write!(
            f,
            "{:<5} {:<13} {:<20} {:<10} {}",
            job.id,
            truncate(job.uuid(), 12),
            truncate(&job.name, 20),
            truncate(&job.provider, 10),
            job.state()
        )
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
