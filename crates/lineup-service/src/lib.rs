//! Validation rules and the authenticated command pipeline for Lineup.
//!
//! This crate is where commands are decided:
//!
//! 1. **Auth gate** — every mutating command presents a credential
//!    first ([`AuthGate`](lineup_auth::AuthGate), checked before any
//!    rule runs)
//! 2. **Rules** — pure predicates over one store snapshot
//!    ([`validate_player_creation`] and friends)
//! 3. **Pipeline** — validate-then-commit with bounded retry on store
//!    conflicts ([`LineupService`])
//!
//! # How it fits in the stack
//!
//! ```text
//! HTTP layer (above)   ← decodes bodies into lineup-protocol commands
//!     ↕
//! Service (this crate) ← decides; owns rules, retries, error mapping
//!     ↕
//! Store (below)        ← commits; owns rows, snapshots, conflicts
//! ```

mod config;
mod error;
mod rules;
mod service;

pub use config::ServiceConfig;
pub use error::{CommandError, Rejection};
pub use rules::{
    validate_game_creation, validate_membership, validate_player_creation, NewGame, NewMember,
    NewPlayer, EMAIL_MAX_CHARS, NAME_MAX_CHARS,
};
pub use service::LineupService;
