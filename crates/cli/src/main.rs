// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jr - jobrelay CLI

mod commands;
mod config;
mod error;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use commands::{capabilities, job, run};
use config::Config;
use error::JrError;
use output::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "jr",
    version,
    about = "jobrelay - run jobs through pluggable providers and publishers"
)]
struct Cli {
    /// Config file (default: ./jobrelay.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// State directory, overriding the config file
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a job and run it to completion
    Run(run::RunArgs),
    /// List jobs
    List,
    /// Show one job by uuid or unique prefix
    Show {
        /// Job uuid or prefix
        id: String,
    },
    /// List capability keys and whether they are approved
    Capabilities,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e.message, "command failed");
            eprint!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<ExitCode, JrError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(state_dir) = cli.state_dir {
        config.state_dir = state_dir;
    }
    let _guard = logging::setup_logging(&config.log_path())?;

    match cli.command {
        Commands::Run(args) => return run::handle(args, &config, cli.output).await,
        Commands::List => job::list(&config, cli.output)?,
        Commands::Show { id } => job::show(&id, &config, cli.output)?,
        Commands::Capabilities => capabilities::list(&config, cli.output),
    }
    Ok(ExitCode::SUCCESS)
}
