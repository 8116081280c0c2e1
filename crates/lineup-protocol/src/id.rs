//! Identifier types shared by every layer of Lineup.
//!
//! Players and games are referred to by system-assigned numeric ids
//! everywhere: in commands, in stored records, in log lines, and in the
//! bodies the HTTP layer sends back. Keeping the ids in one tiny module
//! means every crate agrees on what an id looks like on the wire.

// Serde gives us the two conversion traits every wire type needs:
//   - `Serialize`:   the type can be turned into JSON (or any format).
//   - `Deserialize`: the type can be built back from JSON.
// The derive macro writes both implementations for us.
use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a registered player.
///
/// This is a newtype: a `u64` wrapped in a named struct. The wrapper costs
/// nothing at runtime but buys two things:
///
/// 1. **Type safety** — a `GameId` cannot be passed where a `PlayerId` is
///    expected, even though both are `u64` inside. With two id spaces that
///    both start at 1, mixing them up would be an easy, silent bug.
/// 2. **Readability** — `add_member(game: GameId, player: PlayerId)` says
///    more than two bare integers ever could.
///
/// The derives:
///   - `Debug`            → `{:?}` formatting in tests and logs
///   - `Clone, Copy`      → ids are passed by value, it is just a u64
///   - `PartialEq, Eq`    → `==` comparison
///   - `PartialOrd, Ord`  → ids sort numerically, so a game's member set
///                          can live in a `BTreeSet` and always iterate in
///                          the same order
///   - `Hash`             → usable as a map key in the store's indexes
///
/// `#[serde(transparent)]` makes the JSON form the plain number: a
/// `PlayerId(7)` serializes as `7`, not `{"0":7}`. Request and response
/// bodies carry bare integers, so the wrapper must be invisible there.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

/// Display is what log lines use. `tracing::info!(%player_id, ...)` prints
/// "P-7", which is easier to grep for than a bare number.
impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for a game.
///
/// Same newtype pattern as [`PlayerId`]. A game is one joinable container
/// of up to five player memberships.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The id types promise two exact external shapes: a plain number in
    //! JSON and a prefixed form in logs. Both are asserted here because
    //! either one drifting breaks a consumer (the HTTP layer, or anyone
    //! grepping logs).

    use super::*;

    #[test]
    fn test_player_id_serializes_as_plain_number() {
        // `#[serde(transparent)]` means PlayerId(7) → `7`, not `{"0":7}`.
        let json = serde_json::to_string(&PlayerId(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn test_player_id_deserializes_from_plain_number() {
        let id: PlayerId = serde_json::from_str("7").unwrap();
        assert_eq!(id, PlayerId(7));
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId(42).to_string(), "P-42");
    }

    #[test]
    fn test_game_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&GameId(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn test_game_id_display() {
        assert_eq!(GameId(12).to_string(), "G-12");
    }

    #[test]
    fn test_player_ids_order_numerically() {
        // Member sets are BTreeSets keyed on this ordering; a game's
        // members must always list lowest id first.
        let mut ids = vec![PlayerId(10), PlayerId(2), PlayerId(7)];
        ids.sort();
        assert_eq!(ids, vec![PlayerId(2), PlayerId(7), PlayerId(10)]);
    }

    #[test]
    fn test_decode_non_number_returns_error() {
        let result: Result<PlayerId, _> = serde_json::from_str("\"seven\"");
        assert!(result.is_err());
    }
}
