// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Pluggable capabilities: providers run jobs, publishers report them
//!
//! A job names its provider and publisher by capability key. The
//! [`CapabilityRegistry`] maps approved keys to factories and is the only way
//! an instance is constructed.

pub mod provider;
pub mod publisher;
pub mod registry;
pub mod traced;

pub use provider::{EchoProvider, Provider, ProviderError, ShellProvider};
pub use publisher::{FilePublisher, LogPublisher, Publisher, PublisherError};
pub use registry::{CapabilityKind, CapabilityRegistry, FactoryError, ResolveError};
pub use traced::{TracedProvider, TracedPublisher};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use provider::{FakeBehavior, FakeProvider, ProviderCall};
#[cfg(any(test, feature = "test-support"))]
pub use publisher::{FakePublisher, PublisherCall};
