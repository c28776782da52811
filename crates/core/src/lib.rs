// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jr-core: domain types for the jobrelay pipeline
//!
//! This crate provides:
//! - The job record and its lifecycle state machine
//! - Operations, the unit of a store transaction
//! - Job events and the in-process event bus
//! - Clock and id abstractions for deterministic tests

pub mod clock;
pub mod event;
pub mod events;
pub mod id;
pub mod job;
pub mod operation;
pub mod state;

pub use clock::{Clock, FakeClock, SystemClock};
pub use event::JobEvent;
pub use events::{EventBus, EventPattern, EventReceiver, SubscriberId, Subscription};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use job::Job;
pub use operation::Operation;
pub use state::{State, TransitionError, UnknownStateError};
