//! Assembling a ready-to-serve [`LineupService`].

use lineup_auth::AuthGate;
use lineup_service::{LineupService, ServiceConfig};
use lineup_store::{EntityStore, MemoryStore};

/// Builder for wiring a [`LineupService`] out of its parts.
///
/// The auth gate is always supplied by the caller; the store defaults
/// to the in-memory backend unless one is passed explicitly.
///
/// # Example
///
/// ```rust
/// use lineup::prelude::*;
///
/// let registry = TokenRegistry::new().with_account("coach", "whistle");
/// let service = LineupBuilder::new().build(registry);
/// # let _ = service;
/// ```
pub struct LineupBuilder {
    config: ServiceConfig,
}

impl LineupBuilder {
    /// Builder with default tuning.
    pub fn new() -> Self {
        Self {
            config: ServiceConfig::default(),
        }
    }

    /// Overrides the pipeline tuning.
    pub fn service_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds a service over a fresh in-memory store with the given
    /// auth gate.
    pub fn build<A: AuthGate>(self, gate: A) -> LineupService<MemoryStore, A> {
        self.build_with_store(MemoryStore::new(), gate)
    }

    /// Builds a service over an explicit store backend.
    pub fn build_with_store<S, A>(self, store: S, gate: A) -> LineupService<S, A>
    where
        S: EntityStore,
        A: AuthGate,
    {
        tracing::debug!(
            max_attempts = self.config.max_attempts,
            backoff_cap_ms = self.config.backoff_cap_ms,
            "lineup service assembled"
        );
        LineupService::with_config(store, gate, self.config)
    }
}

impl Default for LineupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
