// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability registry: resolves capability keys to fresh instances
//!
//! Keys share one namespace across providers and publishers. A key must be
//! registered at startup, and when an allowlist exists for its kind it must
//! also be approved. Every resolution constructs a new instance and wraps it
//! in the matching traced adapter.

use crate::provider::{EchoProvider, Provider, ShellProvider};
use crate::publisher::{FilePublisher, LogPublisher, Publisher};
use crate::traced::{TracedProvider, TracedPublisher};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Error returned by a capability factory
pub type FactoryError = Box<dyn std::error::Error + Send + Sync>;

type ProviderFactory = Arc<dyn Fn() -> Result<Arc<dyn Provider>, FactoryError> + Send + Sync>;
type PublisherFactory = Arc<dyn Fn() -> Result<Arc<dyn Publisher>, FactoryError> + Send + Sync>;

/// Which capability a key provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityKind {
    Provider,
    Publisher,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityKind::Provider => write!(f, "provider"),
            CapabilityKind::Publisher => write!(f, "publisher"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unknown capability: {key:?}")]
    Unknown { key: String },
    #[error("{kind} {key:?} is not approved")]
    NotApproved { key: String, kind: CapabilityKind },
    #[error("{key:?} is a {found}, not a {expected}")]
    WrongCapability {
        key: String,
        expected: CapabilityKind,
        found: CapabilityKind,
    },
    #[error("failed to construct {key:?}: {source}")]
    Construction {
        key: String,
        #[source]
        source: FactoryError,
    },
}

impl ResolveError {
    /// The capability key that failed to resolve
    pub fn key(&self) -> &str {
        match self {
            ResolveError::Unknown { key }
            | ResolveError::NotApproved { key, .. }
            | ResolveError::WrongCapability { key, .. }
            | ResolveError::Construction { key, .. } => key,
        }
    }
}

#[derive(Clone)]
enum Entry {
    Provider(ProviderFactory),
    Publisher(PublisherFactory),
}

impl Entry {
    fn kind(&self) -> CapabilityKind {
        match self {
            Entry::Provider(_) => CapabilityKind::Provider,
            Entry::Publisher(_) => CapabilityKind::Publisher,
        }
    }
}

/// Closed mapping of approved capability keys to factories
#[derive(Clone, Default)]
pub struct CapabilityRegistry {
    entries: BTreeMap<String, Entry>,
    approved: HashMap<CapabilityKind, BTreeSet<String>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in capabilities
    ///
    /// Providers: `shell`, `echo`. Publishers: `log`, and `file` writing
    /// into `publish_dir`.
    pub fn builtin(publish_dir: impl Into<PathBuf>) -> Self {
        let publish_dir = publish_dir.into();
        let mut registry = Self::new();
        registry.register_provider("shell", || Ok(ShellProvider::new()));
        registry.register_provider("echo", || Ok(EchoProvider::new()));
        registry.register_publisher("log", || Ok(LogPublisher));
        registry.register_publisher("file", move || Ok(FilePublisher::new(publish_dir.clone())));
        registry
    }

    /// Register a provider factory, replacing any entry under `key`
    pub fn register_provider<P, F>(&mut self, key: impl Into<String>, factory: F)
    where
        P: Provider,
        F: Fn() -> Result<P, FactoryError> + Send + Sync + 'static,
    {
        let factory: ProviderFactory =
            Arc::new(move || factory().map(|p| Arc::new(p) as Arc<dyn Provider>));
        self.entries.insert(key.into(), Entry::Provider(factory));
    }

    /// Register a publisher factory, replacing any entry under `key`
    pub fn register_publisher<P, F>(&mut self, key: impl Into<String>, factory: F)
    where
        P: Publisher,
        F: Fn() -> Result<P, FactoryError> + Send + Sync + 'static,
    {
        let factory: PublisherFactory =
            Arc::new(move || factory().map(|p| Arc::new(p) as Arc<dyn Publisher>));
        self.entries.insert(key.into(), Entry::Publisher(factory));
    }

    /// Restrict `kind` to the given keys. Without a call, every registered
    /// key of that kind is approved.
    pub fn approve<I, K>(&mut self, kind: CapabilityKind, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.approved
            .insert(kind, keys.into_iter().map(Into::into).collect());
    }

    pub fn is_approved(&self, kind: CapabilityKind, key: &str) -> bool {
        self.approved
            .get(&kind)
            .is_none_or(|allowed| allowed.contains(key))
    }

    /// Registered keys in sorted order, with their kind and approval
    pub fn capabilities(&self) -> Vec<(String, CapabilityKind, bool)> {
        self.entries
            .iter()
            .map(|(key, entry)| {
                let kind = entry.kind();
                (key.clone(), kind, self.is_approved(kind, key))
            })
            .collect()
    }

    /// Construct a new provider for `key`
    pub fn resolve_provider(&self, key: &str) -> Result<TracedProvider, ResolveError> {
        match self.lookup(key, CapabilityKind::Provider)? {
            Entry::Provider(factory) => {
                let inner = factory().map_err(|source| ResolveError::Construction {
                    key: key.to_string(),
                    source,
                })?;
                Ok(TracedProvider::new(key, inner))
            }
            Entry::Publisher(_) => Err(wrong(key, CapabilityKind::Provider)),
        }
    }

    /// Construct a new publisher for `key`
    pub fn resolve_publisher(&self, key: &str) -> Result<TracedPublisher, ResolveError> {
        match self.lookup(key, CapabilityKind::Publisher)? {
            Entry::Publisher(factory) => {
                let inner = factory().map_err(|source| ResolveError::Construction {
                    key: key.to_string(),
                    source,
                })?;
                Ok(TracedPublisher::new(key, inner))
            }
            Entry::Provider(_) => Err(wrong(key, CapabilityKind::Publisher)),
        }
    }

    fn lookup(&self, key: &str, expected: CapabilityKind) -> Result<&Entry, ResolveError> {
        let entry = self.entries.get(key).ok_or_else(|| ResolveError::Unknown {
            key: key.to_string(),
        })?;
        if entry.kind() == expected && !self.is_approved(expected, key) {
            return Err(ResolveError::NotApproved {
                key: key.to_string(),
                kind: expected,
            });
        }
        Ok(entry)
    }
}

fn wrong(key: &str, expected: CapabilityKind) -> ResolveError {
    let found = match expected {
        CapabilityKind::Provider => CapabilityKind::Publisher,
        CapabilityKind::Publisher => CapabilityKind::Provider,
    };
    ResolveError::WrongCapability {
        key: key.to_string(),
        expected,
        found,
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
