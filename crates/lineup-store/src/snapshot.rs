//! Immutable, versioned views of the store.

use std::collections::HashMap;
use std::sync::Arc;

use lineup_protocol::{GameId, PlayerId};

use crate::record::{GameRecord, PlayerRecord};

/// The persisted tables plus the reverse indexes for the two unique
/// player columns. Indexes are updated in the same commit as the rows
/// they point at, so a snapshot can answer uniqueness queries without
/// scanning.
#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    pub(crate) players: HashMap<PlayerId, PlayerRecord>,
    pub(crate) games: HashMap<GameId, GameRecord>,
    pub(crate) players_by_name: HashMap<String, PlayerId>,
    pub(crate) players_by_email: HashMap<String, PlayerId>,
}

/// A consistent, immutable view of every table at one store version.
///
/// Snapshots are cheap to take (one `Arc` clone) and never change after
/// they are taken: commits swap in a fresh table set rather than mutating
/// the one snapshots point at. All validation reads for a command happen
/// against a single snapshot, and the snapshot's [`basis`](Self::basis)
/// is what the commit's conflict checks are judged against.
#[derive(Debug, Clone)]
pub struct Snapshot {
    tables: Arc<Tables>,
    basis: u64,
}

impl Snapshot {
    pub(crate) fn new(tables: Arc<Tables>, basis: u64) -> Self {
        Snapshot { tables, basis }
    }

    /// The store version this view was taken at.
    pub fn basis(&self) -> u64 {
        self.basis
    }

    /// Looks up a player row by id.
    pub fn player(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.tables.players.get(&id)
    }

    /// Looks up a game row by id.
    pub fn game(&self, id: GameId) -> Option<&GameRecord> {
        self.tables.games.get(&id)
    }

    /// Looks up a player row by its unique name.
    pub fn player_by_name(&self, name: &str) -> Option<&PlayerRecord> {
        let id = self.tables.players_by_name.get(name)?;
        self.tables.players.get(id)
    }

    /// Looks up a player row by its unique email.
    pub fn player_by_email(&self, email: &str) -> Option<&PlayerRecord> {
        let id = self.tables.players_by_email.get(email)?;
        self.tables.players.get(id)
    }

    /// All player rows, id ascending.
    pub fn players(&self) -> Vec<PlayerRecord> {
        let mut rows: Vec<_> = self.tables.players.values().cloned().collect();
        rows.sort_by_key(|r| r.id);
        rows
    }

    /// All game rows, id ascending.
    pub fn games(&self) -> Vec<GameRecord> {
        let mut rows: Vec<_> = self.tables.games.values().cloned().collect();
        rows.sort_by_key(|r| r.id);
        rows
    }

    /// Number of player rows.
    pub fn player_count(&self) -> usize {
        self.tables.players.len()
    }

    /// Number of game rows.
    pub fn game_count(&self) -> usize {
        self.tables.games.len()
    }
}
