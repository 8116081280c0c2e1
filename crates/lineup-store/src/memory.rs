//! In-memory reference backend.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use lineup_protocol::{GameId, PlayerId};

use crate::error::StoreError;
use crate::record::{GameRecord, PlayerRecord, ROSTER_CAP};
use crate::snapshot::{Snapshot, Tables};
use crate::txn::{Committed, ConstraintKey, Mutation, Transaction};
use crate::EntityStore;

/// Id counters for the two row types. Both start at 1 and only advance
/// when a row is actually inserted.
#[derive(Debug)]
struct IdCounters {
    next_player: u64,
    next_game: u64,
}

/// Everything behind the store lock: the current tables, the version
/// counter, and the per-key commit stamps.
#[derive(Debug)]
struct Shared {
    tables: Arc<Tables>,
    version: u64,
    stamps: HashMap<ConstraintKey, u64>,
    counters: IdCounters,
}

/// The in-memory [`EntityStore`] backend.
///
/// Used by the test suites and the demo; a relational backend would sit
/// behind the same trait. Commits are first-committer-wins: each commit
/// advances a global version and stamps the constraint keys it touched,
/// and a later commit whose basis predates a stamp on any of its own keys
/// is rejected with [`StoreError::Conflict`].
///
/// Two properties the rest of the system leans on:
///
/// - Snapshots are `Arc` clones of the current tables; a commit swaps in
///   a fresh table set, so snapshots taken earlier keep reading exactly
///   what they read before.
/// - The commit critical section has no await points. Once a commit
///   starts applying it finishes, even if the calling future is dropped
///   mid-command; a write is either fully visible or absent.
///
/// Durability beyond the process is the backing engine's concern, not
/// this backend's.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Shared>,
}

impl MemoryStore {
    /// Creates an empty store. Ids start at 1.
    pub fn new() -> Self {
        MemoryStore {
            inner: Mutex::new(Shared {
                tables: Arc::new(Tables::default()),
                version: 0,
                stamps: HashMap::new(),
                counters: IdCounters {
                    next_player: 1,
                    next_game: 1,
                },
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore for MemoryStore {
    async fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let inner = self.inner.lock().await;
        Ok(Snapshot::new(Arc::clone(&inner.tables), inner.version))
    }

    async fn commit(&self, txn: Transaction) -> Result<Committed, StoreError> {
        let mut inner = self.inner.lock().await;

        // First-committer-wins: any touched key stamped after this
        // transaction's basis means its validation read stale state.
        let touches = txn.touches();
        for key in &touches {
            if let Some(&stamp) = inner.stamps.get(key) {
                if stamp > txn.basis() {
                    tracing::debug!(
                        key = %key,
                        basis = txn.basis(),
                        stamp,
                        "commit rejected, key stamped after basis"
                    );
                    return Err(StoreError::Conflict(key.clone()));
                }
            }
        }

        // Apply to a private copy; only a fully applied table set is ever
        // swapped in.
        let mut tables = (*inner.tables).clone();
        let committed = apply(&mut tables, &mut inner.counters, txn.mutation())?;

        inner.version += 1;
        let version = inner.version;
        for key in touches {
            inner.stamps.insert(key, version);
        }
        inner.tables = Arc::new(tables);

        tracing::debug!(version, "commit applied");
        Ok(committed)
    }
}

/// Applies one mutation, all integrity checks first. Counters advance
/// only after every check has passed, so a refused write never burns an
/// id.
fn apply(
    tables: &mut Tables,
    counters: &mut IdCounters,
    mutation: &Mutation,
) -> Result<Committed, StoreError> {
    match mutation {
        Mutation::InsertPlayer { name, email } => {
            if tables.players_by_name.contains_key(name) {
                return Err(StoreError::Integrity(format!(
                    "player name {name:?} is already taken"
                )));
            }
            if tables.players_by_email.contains_key(email) {
                return Err(StoreError::Integrity(format!(
                    "player email {email:?} is already taken"
                )));
            }

            let id = PlayerId(counters.next_player);
            counters.next_player += 1;
            let now = Utc::now();
            let record = PlayerRecord {
                id,
                name: name.clone(),
                email: email.clone(),
                created_at: now,
                updated_at: now,
            };
            tables.players.insert(id, record.clone());
            tables.players_by_name.insert(name.clone(), id);
            tables.players_by_email.insert(email.clone(), id);
            Ok(Committed::Player(record))
        }

        Mutation::InsertGame { name } => {
            let id = GameId(counters.next_game);
            counters.next_game += 1;
            let now = Utc::now();
            let record = GameRecord {
                id,
                name: name.clone(),
                members: BTreeSet::new(),
                created_at: now,
                updated_at: now,
            };
            tables.games.insert(id, record.clone());
            Ok(Committed::Game(record))
        }

        Mutation::AppendMember { game_id, player_id } => {
            if !tables.players.contains_key(player_id) {
                return Err(StoreError::Integrity(format!(
                    "player {player_id} does not exist"
                )));
            }
            let game = tables.games.get_mut(game_id).ok_or_else(|| {
                StoreError::Integrity(format!("game {game_id} does not exist"))
            })?;
            if game.members.len() >= ROSTER_CAP {
                return Err(StoreError::Integrity(format!(
                    "game {game_id} member set is at capacity"
                )));
            }
            if game.members.contains(player_id) {
                return Err(StoreError::Integrity(format!(
                    "player {player_id} is already in game {game_id}"
                )));
            }

            game.members.insert(*player_id);
            game.updated_at = Utc::now();
            Ok(Committed::Membership(game.clone()))
        }
    }
}
