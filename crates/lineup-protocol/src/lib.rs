//! Wire-facing contract for Lineup.
//!
//! This crate defines the "language" spoken at the edge of the core:
//!
//! - **Ids** ([`PlayerId`], [`GameId`]) — the identifier newtypes every
//!   layer shares.
//! - **Commands** ([`CreatePlayer`], [`CreateGame`], [`AddMember`]) — the
//!   typed inputs of the three mutating operations.
//! - **Receipts** ([`CommandAck`], [`ErrorBody`], [`ReasonCode`]) — the
//!   response bodies and the machine-readable rejection codes.
//!
//! # Architecture
//!
//! The contract crate sits between the (external) HTTP layer and the
//! service. It knows nothing about validation rules, storage, or
//! credentials — it only fixes the shapes that cross the boundary.
//!
//! ```text
//! HTTP layer (JSON) → lineup-protocol (typed) → service (rules + store)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod command;
mod id;
mod receipt;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

// Everything is re-exported at the crate root; callers write
// `use lineup_protocol::CreatePlayer`, never the module path.

pub use command::{AddMember, CreateGame, CreatePlayer};
pub use id::{GameId, PlayerId};
pub use receipt::{CommandAck, ErrorBody, ReasonCode, Status};
