//! Credential checking for Lineup.
//!
//! This crate owns the stretch between "a string arrived with the
//! command" and "a named principal may proceed":
//!
//! 1. **The gate** — the [`AuthGate`] trait every mutating command passes
//!    through before validation runs.
//! 2. **Identity** — [`Principal`], the verified subject a gate attaches
//!    to the request.
//! 3. **Dev-grade checkers** — [`StaticTokenGate`] (fixed table, for
//!    tests) and [`TokenRegistry`] (login + opaque expiring tokens, for
//!    the demo and anything demo-shaped).
//!
//! # How it fits in the stack
//!
//! ```text
//! Service (above)  ← calls the gate first; Unauthenticated short-circuits
//!     ↕
//! Auth layer (this crate)  ← credential in, Principal or AuthError out
//! ```
//!
//! Token cryptography is explicitly out of scope: nothing here signs,
//! parses, or trusts credential *contents*. Production deployments plug
//! a real verifier into [`AuthGate`].

#![allow(async_fn_in_trait)]

mod error;
mod gate;
mod principal;
mod registry;

pub use error::AuthError;
pub use gate::{AuthGate, StaticTokenGate};
pub use principal::Principal;
pub use registry::TokenRegistry;
