//! Transactions: one mutation, the snapshot basis it was validated on,
//! and the constraint keys it competes on.

use std::fmt;

use lineup_protocol::{GameId, PlayerId};

use crate::record::{GameRecord, PlayerRecord};
use crate::snapshot::Snapshot;

// ---------------------------------------------------------------------------
// ConstraintKey — the unit of conflict detection
// ---------------------------------------------------------------------------

/// Names one constrained set a mutation competes on.
///
/// Two commits conflict only if they touch the same key. Records are never
/// deleted, so plain existence ("player 3 is a row") can never be
/// invalidated by a later commit and needs no key; only the sets with
/// uniqueness or capacity rules do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintKey {
    /// The unique-name set: all creates claiming this player name.
    PlayerName(String),
    /// The unique-email set: all creates claiming this email.
    PlayerEmail(String),
    /// One game's member set: all appends into this game.
    GameRoster(GameId),
}

impl fmt::Display for ConstraintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKey::PlayerName(name) => write!(f, "player-name {name:?}"),
            ConstraintKey::PlayerEmail(email) => write!(f, "player-email {email:?}"),
            ConstraintKey::GameRoster(game_id) => write!(f, "member-set {game_id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Mutation — the write half of a command
// ---------------------------------------------------------------------------

/// One durable write. Ids and timestamps are assigned by the store at
/// commit time, so mutations carry only caller-supplied values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Insert a new player row.
    InsertPlayer { name: String, email: String },
    /// Insert a new game row with an empty member set.
    InsertGame { name: String },
    /// Append one player to one game's member set.
    AppendMember { game_id: GameId, player_id: PlayerId },
}

impl Mutation {
    /// The constraint keys this mutation competes on.
    ///
    /// Derived from the mutation itself rather than declared by the
    /// caller, so a write can never under-report what it touches. Game
    /// inserts touch nothing: two game creations always commute.
    pub fn touches(&self) -> Vec<ConstraintKey> {
        match self {
            Mutation::InsertPlayer { name, email } => vec![
                ConstraintKey::PlayerName(name.clone()),
                ConstraintKey::PlayerEmail(email.clone()),
            ],
            Mutation::InsertGame { .. } => Vec::new(),
            Mutation::AppendMember { game_id, .. } => {
                vec![ConstraintKey::GameRoster(*game_id)]
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Transaction — a mutation bound to its basis
// ---------------------------------------------------------------------------

/// A mutation paired with the version of the snapshot it was validated
/// against.
///
/// Built from a [`Snapshot`], never from a raw version number: if the
/// rules ran against snapshot X, the commit must be judged against X.
#[derive(Debug, Clone)]
pub struct Transaction {
    basis: u64,
    mutation: Mutation,
}

impl Transaction {
    /// Binds `mutation` to the snapshot its validation read from.
    pub fn new(snapshot: &Snapshot, mutation: Mutation) -> Self {
        Transaction {
            basis: snapshot.basis(),
            mutation,
        }
    }

    /// The store version this transaction's reads were taken at.
    pub fn basis(&self) -> u64 {
        self.basis
    }

    /// The write to apply.
    pub fn mutation(&self) -> &Mutation {
        &self.mutation
    }

    /// The constraint keys to judge this commit on.
    pub fn touches(&self) -> Vec<ConstraintKey> {
        self.mutation.touches()
    }
}

// ---------------------------------------------------------------------------
// Committed — what a successful commit produced
// ---------------------------------------------------------------------------

/// The record state a commit produced, as visible to subsequent reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Committed {
    /// The freshly inserted player row.
    Player(PlayerRecord),
    /// The freshly inserted game row.
    Game(GameRecord),
    /// The game row after the member append.
    Membership(GameRecord),
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_player_touches_name_and_email() {
        let m = Mutation::InsertPlayer {
            name: "deadbeef".into(),
            email: "a@b.com".into(),
        };
        let keys = m.touches();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&ConstraintKey::PlayerName("deadbeef".into())));
        assert!(keys.contains(&ConstraintKey::PlayerEmail("a@b.com".into())));
    }

    #[test]
    fn test_insert_game_touches_nothing() {
        let m = Mutation::InsertGame { name: "Cup".into() };
        assert!(m.touches().is_empty());
    }

    #[test]
    fn test_append_member_touches_only_its_game() {
        let m = Mutation::AppendMember {
            game_id: GameId(4),
            player_id: PlayerId(9),
        };
        assert_eq!(m.touches(), vec![ConstraintKey::GameRoster(GameId(4))]);
    }

    #[test]
    fn test_constraint_key_display() {
        let key = ConstraintKey::PlayerName("c0ffee".into());
        assert_eq!(key.to_string(), "player-name \"c0ffee\"");

        let key = ConstraintKey::GameRoster(GameId(2));
        assert_eq!(key.to_string(), "member-set G-2");
    }

    #[test]
    fn test_keys_for_different_games_differ() {
        // Appends into different games must never be judged against each
        // other.
        let a = ConstraintKey::GameRoster(GameId(1));
        let b = ConstraintKey::GameRoster(GameId(2));
        assert_ne!(a, b);
    }
}
