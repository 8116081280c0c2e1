//! The bundled login flow: accounts in, opaque access tokens out.
//!
//! This is the issuing side the [`AuthGate`] trait deliberately leaves
//! open, provided in dev-grade form so the demo and the test suites have
//! a real end-to-end credential path:
//!
//! ```text
//! login(user, pass) ──→ token issued ──→ verify(token) → Principal
//!                            │
//!                            │ (ttl elapses)
//!                            ▼
//!                       verify → ExpiredCredential
//!                            │
//!                            ▼
//!                      purge_expired() → token forgotten
//! ```
//!
//! Tokens are opaque random strings with a fixed lifetime. There is no
//! signing, no claims, and passwords are compared in plain text — none of
//! which survives contact with production. Swap in a real gate there.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::Mutex;

use crate::{AuthError, AuthGate, Principal};

/// Token lifetime unless configured otherwise.
const DEFAULT_TTL_SECS: u64 = 900;

/// Bookkeeping for one issued token.
#[derive(Debug, Clone)]
struct IssuedToken {
    subject: String,
    issued_at: Instant,
}

/// Issues access tokens for configured accounts and verifies them as an
/// [`AuthGate`].
///
/// Accounts and the lifetime are fixed when the registry is built; the
/// issued-token table is the only mutable state and lives behind its own
/// lock, so one registry instance serves every task that holds it.
///
/// An expired token stays in the table (and keeps answering
/// [`AuthError::ExpiredCredential`], which tells the caller to log in
/// again) until [`purge_expired`](Self::purge_expired) sweeps it out,
/// after which it is indistinguishable from a token that never existed.
#[derive(Debug)]
pub struct TokenRegistry {
    /// Configured accounts, username → password.
    accounts: HashMap<String, String>,
    /// How long an issued token stays valid.
    ttl: Duration,
    /// Issued tokens, token → bookkeeping. Kept behind a lock because
    /// logins and verifications arrive from concurrent tasks.
    issued: Mutex<HashMap<String, IssuedToken>>,
}

impl TokenRegistry {
    /// An empty registry: no accounts, default lifetime. Every login
    /// fails until accounts are added with
    /// [`with_account`](Self::with_account).
    pub fn new() -> Self {
        TokenRegistry {
            accounts: HashMap::new(),
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            issued: Mutex::new(HashMap::new()),
        }
    }

    /// Adds one account that may log in.
    pub fn with_account(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.accounts.insert(username.into(), password.into());
        self
    }

    /// Overrides the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Checks the username/password pair and mints a fresh access token.
    ///
    /// Every successful login issues a new token; earlier tokens for the
    /// same account stay valid until they expire.
    ///
    /// # Errors
    /// Returns [`AuthError::BadLogin`] for an unknown username or a wrong
    /// password, without saying which.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<String, AuthError> {
        match self.accounts.get(username) {
            Some(stored) if stored == password => {}
            _ => {
                tracing::debug!(username, "login rejected");
                return Err(AuthError::BadLogin);
            }
        }

        let token = mint_token();
        let mut issued = self.issued.lock().await;
        issued.insert(
            token.clone(),
            IssuedToken {
                subject: username.to_string(),
                issued_at: Instant::now(),
            },
        );
        tracing::info!(subject = username, "access token issued");
        Ok(token)
    }

    /// Drops every token past its lifetime. Returns how many were
    /// removed.
    ///
    /// Verification does not need this for correctness (stale tokens are
    /// refused either way); it only bounds the table's memory.
    pub async fn purge_expired(&self) -> usize {
        let mut issued = self.issued.lock().await;
        let before = issued.len();
        issued.retain(|_, entry| entry.issued_at.elapsed() <= self.ttl);
        let removed = before - issued.len();
        if removed > 0 {
            tracing::info!(removed, "expired tokens purged");
        }
        removed
    }

    /// Number of tokens currently in the table, expired ones included.
    pub async fn issued_count(&self) -> usize {
        self.issued.lock().await.len()
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthGate for TokenRegistry {
    async fn verify(&self, credential: &str) -> Result<Principal, AuthError> {
        let issued = self.issued.lock().await;
        let entry = issued
            .get(credential)
            .ok_or(AuthError::InvalidCredential)?;

        if entry.issued_at.elapsed() > self.ttl {
            return Err(AuthError::ExpiredCredential);
        }
        Ok(Principal::new(entry.subject.clone()))
    }
}

/// A random 32-character hex string (128 bits of entropy), which is
/// plenty to make guessing an issued token infeasible.
fn mint_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// =========================================================================
// Tests
// =========================================================================
