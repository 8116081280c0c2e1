//! Typed inputs for the three mutating commands.
//!
//! The HTTP layer's job is to turn a request body into one of these
//! structs and hand it to the service; the core never sees raw JSON.
//! Field names here ARE the wire contract — serde derives use the field
//! name as the JSON key, so renaming a field is a breaking change for
//! every client.

use serde::{Deserialize, Serialize};

use crate::id::{GameId, PlayerId};

// ---------------------------------------------------------------------------
// Command inputs
// ---------------------------------------------------------------------------

/// Request to register a new player.
///
/// Both fields are validated by the service before anything is written:
/// name and email each have a length cap, the name a character-set rule,
/// the email a format rule, and both a uniqueness rule. The struct itself
/// carries the raw, unvalidated input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlayer {
    /// Requested player name. Unique across all players once accepted.
    pub name: String,
    /// Contact email. Unique across all players once accepted.
    pub email: String,
}

/// Request to create a new game.
///
/// Games start with an empty member set. The name is free-form and may be
/// anything, including empty; there is no uniqueness rule for game names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGame {
    /// Display name for the game. Defaults to empty when the caller sends
    /// `""`; the core does not reject any value here.
    pub name: String,
}

/// Request to add one player to one game's member set.
///
/// Both ids must refer to existing records; the game must have a free
/// slot and must not already contain the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddMember {
    /// The game receiving a new member.
    pub game_id: GameId,
    /// The player being added.
    pub player_id: PlayerId,
}

// =========================================================================
// Tests
// =========================================================================
