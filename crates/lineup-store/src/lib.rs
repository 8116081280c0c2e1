//! Versioned entity store for Lineup.
//!
//! Owns every durable record: player rows, game rows, and the membership
//! relation inline in each game's member set. The rest of the system
//! reaches it through two calls:
//!
//! - [`EntityStore::snapshot`] — an immutable, consistent view of all
//!   tables at one version. All of a command's validation reads come from
//!   a single snapshot.
//! - [`EntityStore::commit`] — one atomic mutation, judged against the
//!   snapshot version the caller validated on. If any constrained set the
//!   mutation touches changed since that version, the commit is refused
//!   with [`StoreError::Conflict`] and the caller re-validates.
//!
//! ```text
//! snapshot (version N) → validate → Transaction { basis: N, mutation }
//!                                       │
//!                             commit: touched keys stamped ≤ N?
//!                                yes → apply, stamp at N+1
//!                                no  → Conflict (re-validate, retry)
//! ```
//!
//! Conflict detection is per constraint key ([`ConstraintKey`]): a player
//! name, a player email, or one game's member set. Writes that compete on
//! no common key never conflict, so unrelated operations commit fully in
//! parallel.

#![allow(async_fn_in_trait)]

mod error;
mod memory;
mod record;
mod snapshot;
mod txn;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use record::{GameRecord, PlayerRecord, ROSTER_CAP};
pub use snapshot::Snapshot;
pub use txn::{Committed, ConstraintKey, Mutation, Transaction};

/// The query/command seam in front of the datastore.
///
/// The in-memory backend ships in this crate; a relational engine would
/// implement the same two calls (snapshot isolation on the query side,
/// serialization-conflict errors on the command side).
///
/// Both futures are `Send`: command handlers run on a multi-threaded
/// runtime and one store instance serves every in-flight task.
pub trait EntityStore: Send + Sync + 'static {
    /// Takes an immutable view of all tables at the current version.
    fn snapshot(
        &self,
    ) -> impl std::future::Future<Output = Result<Snapshot, StoreError>> + Send;

    /// Atomically applies one transaction.
    ///
    /// Fails with [`StoreError::Conflict`] if any constraint key the
    /// transaction touches was stamped by another commit after the
    /// transaction's basis. A conflict is transient: take a fresh
    /// snapshot, re-validate, and commit again.
    fn commit(
        &self,
        txn: Transaction,
    ) -> impl std::future::Future<Output = Result<Committed, StoreError>> + Send;
}
