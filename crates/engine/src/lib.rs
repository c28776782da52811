// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobrelay execution engine
//!
//! The executor runs one job to `COMPLETED` and announces it on the bus; the
//! publish worker reacts by running the job's publisher; the update worker
//! commits the publisher's outcome and announces the final state.

mod error;
mod executor;
mod publish;
mod runtime;
mod update;

pub use error::RuntimeError;
pub use executor::{ExecuteError, ExecutorHandle, JobExecutor};
pub use publish::PublishWorker;
pub use runtime::{Runtime, RuntimeConfig};
pub use update::UpdateWorker;

#[cfg(test)]
mod test_helpers;
