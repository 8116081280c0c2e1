//! The command pipeline: gate, validate, commit, retry.
//!
//! Every mutating command flows through the same stations:
//!
//! ```text
//! credential ──→ auth gate ──→ snapshot ──→ rules ──→ commit ──→ id
//!                    │                        │          │
//!                    ▼                        ▼          ▼ (conflict)
//!             Unauthenticated             Rejected   fresh snapshot,
//!                                                    re-validate, retry
//! ```
//!
//! The retry loop is what turns the store's first-committer-wins
//! conflicts into the behavior callers actually observe: the loser of a
//! duplicate-name race re-validates against the winner's commit and
//! comes back with `DuplicateName`, not a conflict error. Only a
//! command that keeps losing races surfaces a transient store failure.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use lineup_auth::{AuthError, AuthGate, Principal};
use lineup_protocol::{AddMember, CreateGame, CreatePlayer, GameId, PlayerId};
use lineup_store::{
    Committed, EntityStore, GameRecord, Mutation, PlayerRecord, Snapshot, StoreError, Transaction,
};

use crate::config::ServiceConfig;
use crate::error::{CommandError, Rejection};
use crate::rules::{
    validate_game_creation, validate_membership, validate_player_creation, NewGame, NewMember,
    NewPlayer,
};

/// The membership-mutation service.
///
/// Stateless between requests: all durable state lives behind the
/// [`EntityStore`], all credential state behind the [`AuthGate`]. One
/// instance serves every concurrent caller; methods take `&self` and
/// the store serializes the commits.
pub struct LineupService<S, A> {
    store: S,
    gate: A,
    config: ServiceConfig,
}

impl<S, A> LineupService<S, A>
where
    S: EntityStore,
    A: AuthGate,
{
    /// Service with default tuning.
    pub fn new(store: S, gate: A) -> Self {
        Self::with_config(store, gate, ServiceConfig::default())
    }

    /// Service with explicit tuning.
    pub fn with_config(store: S, gate: A, config: ServiceConfig) -> Self {
        Self { store, gate, config }
    }

    /// The active tuning.
    pub fn config(&self) -> ServiceConfig {
        self.config
    }

    // -----------------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------------

    /// Resolves a credential to a principal, or refuses the command.
    ///
    /// Runs before any validation so an unauthenticated caller learns
    /// nothing about which rules a command would have tripped.
    async fn authenticate(&self, credential: Option<&str>) -> Result<Principal, CommandError> {
        let Some(token) = credential else {
            return Err(CommandError::Unauthenticated(AuthError::MissingCredential));
        };
        self.gate.verify(token).await.map_err(|err| {
            debug!(%err, "credential refused");
            CommandError::Unauthenticated(err)
        })
    }

    /// Verifies a credential without running a command.
    pub async fn identify(&self, credential: Option<&str>) -> Result<Principal, CommandError> {
        self.authenticate(credential).await
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Registers a new player and returns its id.
    pub async fn create_player(
        &self,
        credential: Option<&str>,
        cmd: CreatePlayer,
    ) -> Result<PlayerId, CommandError> {
        let principal = self.authenticate(credential).await?;

        let committed = self
            .submit("create_player", |snapshot| {
                validate_player_creation(snapshot, &cmd.name, &cmd.email)
                    .map(NewPlayer::into_mutation)
            })
            .await?;
        let Committed::Player(record) = committed else {
            return Err(mismatched_commit("create_player"));
        };

        info!(%principal, id = %record.id, name = %record.name, "player created");
        Ok(record.id)
    }

    /// Creates a new game with an empty member set and returns its id.
    pub async fn create_game(
        &self,
        credential: Option<&str>,
        cmd: CreateGame,
    ) -> Result<GameId, CommandError> {
        let principal = self.authenticate(credential).await?;

        let committed = self
            .submit("create_game", |_snapshot| {
                validate_game_creation(&cmd.name).map(NewGame::into_mutation)
            })
            .await?;
        let Committed::Game(record) = committed else {
            return Err(mismatched_commit("create_game"));
        };

        info!(%principal, id = %record.id, "game created");
        Ok(record.id)
    }

    /// Adds a player to a game's member set and echoes the game id.
    pub async fn add_member(
        &self,
        credential: Option<&str>,
        cmd: AddMember,
    ) -> Result<GameId, CommandError> {
        let principal = self.authenticate(credential).await?;

        let committed = self
            .submit("add_member", |snapshot| {
                validate_membership(snapshot, cmd.game_id, cmd.player_id)
                    .map(NewMember::into_mutation)
            })
            .await?;
        let Committed::Membership(record) = committed else {
            return Err(mismatched_commit("add_member"));
        };

        info!(
            %principal,
            game = %record.id,
            player = %cmd.player_id,
            members = record.member_count(),
            "member added"
        );
        Ok(record.id)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Looks up one player.
    pub async fn player(&self, id: PlayerId) -> Result<Option<PlayerRecord>, CommandError> {
        let snapshot = self.store.snapshot().await.map_err(CommandError::Store)?;
        Ok(snapshot.player(id).cloned())
    }

    /// Looks up one game.
    pub async fn game(&self, id: GameId) -> Result<Option<GameRecord>, CommandError> {
        let snapshot = self.store.snapshot().await.map_err(CommandError::Store)?;
        Ok(snapshot.game(id).cloned())
    }

    /// All players, id ascending.
    pub async fn players(&self) -> Result<Vec<PlayerRecord>, CommandError> {
        let snapshot = self.store.snapshot().await.map_err(CommandError::Store)?;
        Ok(snapshot.players())
    }

    /// All games, id ascending.
    pub async fn games(&self) -> Result<Vec<GameRecord>, CommandError> {
        let snapshot = self.store.snapshot().await.map_err(CommandError::Store)?;
        Ok(snapshot.games())
    }

    // -----------------------------------------------------------------------
    // The retry driver
    // -----------------------------------------------------------------------

    /// Runs one validate-then-commit plan until it commits, the plan
    /// rejects, or attempts run out.
    ///
    /// `plan` sees a fresh snapshot on every attempt and either produces
    /// the mutation to commit or rejects the command; the transaction is
    /// bound to the same snapshot the plan read. Rejections return
    /// immediately. Conflicts burn an attempt and re-plan, so stale
    /// validation is always re-run with the competing write visible.
    async fn submit<F>(&self, op: &'static str, plan: F) -> Result<Committed, CommandError>
    where
        F: Fn(&Snapshot) -> Result<Mutation, Rejection>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            let snapshot = self.store.snapshot().await.map_err(CommandError::Store)?;
            let mutation = plan(&snapshot)?;
            let txn = Transaction::new(&snapshot, mutation);

            match self.store.commit(txn).await {
                Ok(committed) => return Ok(committed),
                Err(err) if err.is_transient() && attempt < max_attempts => {
                    debug!(op, attempt, %err, "commit conflicted, retrying");
                    attempt += 1;
                    self.backoff().await;
                }
                Err(err) => {
                    if err.is_transient() {
                        warn!(op, attempt, %err, "attempts exhausted");
                    } else {
                        warn!(op, %err, "store refused commit");
                    }
                    return Err(CommandError::Store(err));
                }
            }
        }
    }

    /// Short random pause between attempts, so racing commands do not
    /// re-collide in lockstep.
    async fn backoff(&self) {
        let cap = self.config.backoff_cap_ms;
        if cap == 0 {
            return;
        }
        // The rng handle must drop before the await point.
        let pause = rand::rng().random_range(0..=cap);
        tokio::time::sleep(Duration::from_millis(pause)).await;
    }
}

/// A commit answered with the wrong receipt shape. Backend bug,
/// surfaced as a non-transient store failure.
fn mismatched_commit(op: &'static str) -> CommandError {
    CommandError::Store(StoreError::Integrity(format!(
        "{op} commit returned a mismatched record"
    )))
}
