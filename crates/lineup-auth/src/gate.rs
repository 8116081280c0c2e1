//! The credential-checking hook in front of every mutating command.
//!
//! Lineup does not decide what a credential *is* — that belongs to
//! whatever issues them (the bundled [`TokenRegistry`](crate::TokenRegistry),
//! or an external provider in a real deployment). It only insists that
//! every mutating command presents one, and that some implementation of
//! [`AuthGate`] vouches for it before any rule runs.
//!
//! # Why a trait?
//!
//! The gate is the one seam the core must not hardcode: production wants
//! a real token service, the demo wants the bundled registry, and tests
//! want a table of made-up tokens. One trait with one async method serves
//! all three without the core changing.

use std::collections::HashMap;

use crate::{AuthError, Principal};

/// Judges a presented credential and names the principal behind it.
///
/// # Trait bounds
///
/// - `Send + Sync` → one gate instance is shared across every in-flight
///   command task.
/// - `'static` → the gate lives as long as the service; it cannot borrow
///   temporary data.
///
/// Absence of a credential is not the gate's business: the service maps
/// "no credential at all" to [`AuthError::MissingCredential`] itself, so
/// implementations only ever see a presented string.
///
/// # Example
///
/// ```rust
/// use lineup_auth::{AuthError, AuthGate, Principal};
///
/// /// Accepts exactly one hardwired token. Never use in production.
/// struct OneTokenGate;
///
/// impl AuthGate for OneTokenGate {
///     async fn verify(&self, credential: &str) -> Result<Principal, AuthError> {
///         if credential == "let-me-in" {
///             Ok(Principal::new("dev"))
///         } else {
///             Err(AuthError::InvalidCredential)
///         }
///     }
/// }
/// ```
pub trait AuthGate: Send + Sync + 'static {
    /// Verifies the credential and returns who it belongs to.
    ///
    /// # Returns
    /// - `Ok(Principal)` — the credential is valid and current
    /// - `Err(AuthError::InvalidCredential)` — not one we recognize
    /// - `Err(AuthError::ExpiredCredential)` — recognized but stale
    fn verify(
        &self,
        credential: &str,
    ) -> impl std::future::Future<Output = Result<Principal, AuthError>> + Send;
}

/// A fixed token→subject table.
///
/// For tests and wiring examples: every configured token is valid
/// forever, everything else is rejected. There is no issuance and no
/// expiry, which is exactly why it must never face real traffic.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenGate {
    tokens: HashMap<String, String>,
}

impl StaticTokenGate {
    /// An empty gate that rejects everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one accepted token for `subject`.
    pub fn with_token(
        mut self,
        token: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        self.tokens.insert(token.into(), subject.into());
        self
    }
}

impl AuthGate for StaticTokenGate {
    async fn verify(&self, credential: &str) -> Result<Principal, AuthError> {
        self.tokens
            .get(credential)
            .map(|subject| Principal::new(subject.clone()))
            .ok_or(AuthError::InvalidCredential)
    }
}

/// Blanket implementation for `Arc<G>` where `G: AuthGate`.
///
/// Lets one gate instance serve two surfaces at once: the service holds
/// one handle for verification while the login endpoint holds another
/// for issuance.
impl<G: AuthGate> AuthGate for std::sync::Arc<G> {
    fn verify(
        &self,
        credential: &str,
    ) -> impl std::future::Future<Output = Result<Principal, AuthError>> + Send {
        (**self).verify(credential)
    }
}

// =========================================================================
// Tests
// =========================================================================
