//! The two row types the store persists.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lineup_protocol::{GameId, PlayerId};

/// Maximum number of members a game may hold.
///
/// The membership rule compares the pre-addition member count against this
/// value, and the store refuses any append that would push a member set
/// past it. Changing the cap means changing this one constant.
pub const ROSTER_CAP: usize = 5;

/// One registered player row.
///
/// `name` and `email` are unique across all players; the store maintains
/// the reverse indexes that make those lookups O(1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Store-assigned identifier, dense from 1.
    pub id: PlayerId,
    /// Unique player name.
    pub name: String,
    /// Unique contact email.
    pub email: String,
    /// Set once when the row is created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation of the row.
    pub updated_at: DateTime<Utc>,
}

/// One game row, member set inline.
///
/// The member set is a `BTreeSet` so iteration order is always
/// lowest-id-first, which keeps serialized games and test assertions
/// stable. The display name is free-form and may be empty; the storage
/// column behind it is 254 chars wide, which is the excluded engine's
/// concern, not a validated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Store-assigned identifier, dense from 1.
    pub id: GameId,
    /// Display name, unconstrained, defaults to empty.
    pub name: String,
    /// Current members. Never more than [`ROSTER_CAP`] entries.
    pub members: BTreeSet<PlayerId>,
    /// Set once when the row is created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation of the row, including member appends.
    pub updated_at: DateTime<Utc>,
}

impl GameRecord {
    /// Number of players currently in the game.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Whether `player_id` is already in the member set.
    pub fn has_member(&self, player_id: PlayerId) -> bool {
        self.members.contains(&player_id)
    }

    /// Whether the member set has reached [`ROSTER_CAP`].
    pub fn is_full(&self) -> bool {
        self.members.len() >= ROSTER_CAP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn game_with_members(ids: &[u64]) -> GameRecord {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        GameRecord {
            id: GameId(1),
            name: String::new(),
            members: ids.iter().map(|n| PlayerId(*n)).collect(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_game_is_full_at_cap() {
        assert!(!game_with_members(&[1, 2, 3, 4]).is_full());
        assert!(game_with_members(&[1, 2, 3, 4, 5]).is_full());
    }

    #[test]
    fn test_game_has_member() {
        let game = game_with_members(&[3, 9]);
        assert!(game.has_member(PlayerId(9)));
        assert!(!game.has_member(PlayerId(4)));
    }

    #[test]
    fn test_game_members_serialize_lowest_id_first() {
        // BTreeSet ordering is part of the serialized shape.
        let game = game_with_members(&[9, 3, 7]);
        let json: serde_json::Value = serde_json::to_value(&game).unwrap();
        assert_eq!(json["members"], serde_json::json!([3, 7, 9]));
    }

    #[test]
    fn test_player_record_timestamps_serialize_rfc3339() {
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let rec = PlayerRecord {
            id: PlayerId(1),
            name: "deadbeef".into(),
            email: "a@b.com".into(),
            created_at: at,
            updated_at: at,
        };
        let json: serde_json::Value = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["created_at"], "2025-06-01T12:00:00Z");
    }
}
