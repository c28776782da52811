// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Durable job storage

mod state;
mod store;
mod wal;

pub use state::MaterializedState;
pub use store::{JobStore, StoreError, WalStore};
pub use wal::{Wal, WalError};
