//! # Lineup
//!
//! Authenticated player and game membership core.
//!
//! Lineup manages two related entities — registered players and the
//! games they join — through three validated commands: create a player,
//! create a game, add a player to a game's member set. The rules
//! (unique names and emails, the five-member roster cap, no duplicate
//! memberships) hold under concurrent callers: every command validates
//! against one consistent snapshot and commits atomically, retrying a
//! bounded number of times when commits race.
//!
//! ## Quick start
//!
//! ```rust
//! use lineup::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), CommandError> {
//! let gate = StaticTokenGate::new().with_token("sesame", "coach");
//! let service = LineupBuilder::new().build(gate);
//!
//! let player = service
//!     .create_player(
//!         Some("sesame"),
//!         CreatePlayer {
//!             name: "deadbeef".into(),
//!             email: "a@b.com".into(),
//!         },
//!     )
//!     .await?;
//! let game = service
//!     .create_game(Some("sesame"), CreateGame { name: "Cup".into() })
//!     .await?;
//! service
//!     .add_member(Some("sesame"), AddMember { game_id: game, player_id: player })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## How the crates stack
//!
//! ```text
//! lineup (this crate)   ← builder, prelude, one front door
//!     ↕
//! lineup-service        ← rules, auth gating, retry pipeline
//!     ↕
//! lineup-store          ← rows, snapshots, atomic commits
//!
//! lineup-protocol       ← command and receipt types (used by all)
//! lineup-auth           ← credential gate and token registry
//! ```

mod builder;

pub use builder::LineupBuilder;

pub use lineup_auth::{AuthError, AuthGate, Principal, StaticTokenGate, TokenRegistry};
pub use lineup_protocol::{
    AddMember, CommandAck, CreateGame, CreatePlayer, ErrorBody, GameId, PlayerId, ReasonCode,
    Status,
};
pub use lineup_service::{
    CommandError, LineupService, Rejection, ServiceConfig, EMAIL_MAX_CHARS, NAME_MAX_CHARS,
};
pub use lineup_store::{
    EntityStore, GameRecord, MemoryStore, PlayerRecord, Snapshot, StoreError, ROSTER_CAP,
};

/// One-line import for binaries and tests.
pub mod prelude {
    pub use crate::{
        AddMember, AuthError, AuthGate, CommandAck, CommandError, CreateGame, CreatePlayer,
        EntityStore, ErrorBody, GameId, GameRecord, LineupBuilder, LineupService, MemoryStore,
        PlayerId, PlayerRecord, Principal, ReasonCode, Rejection, ServiceConfig, StaticTokenGate,
        Status, TokenRegistry, ROSTER_CAP,
    };
}
