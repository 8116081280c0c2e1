//! Integration tests for the command pipeline.
//!
//! These drive [`LineupService`] end to end against the in-memory store
//! and a static token gate: the gate-before-rules ordering, rejection
//! mapping, the bounded retry driver, and the read surface. Store
//! internals (conflicts, integrity, id assignment) are covered in
//! lineup-store's own suite; here the store is just the thing behind
//! the service.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use lineup_auth::{AuthError, StaticTokenGate};
use lineup_protocol::{AddMember, CreateGame, CreatePlayer, GameId, PlayerId, ReasonCode};
use lineup_service::{CommandError, LineupService, Rejection, ServiceConfig};
use lineup_store::{
    Committed, ConstraintKey, EntityStore, MemoryStore, Snapshot, StoreError, Transaction,
};

const TOKEN: &str = "sesame";

type Service = LineupService<MemoryStore, StaticTokenGate>;

/// Service over a fresh store, accepting one known token.
fn service() -> Service {
    LineupService::new(MemoryStore::new(), gate())
}

fn gate() -> StaticTokenGate {
    StaticTokenGate::new().with_token(TOKEN, "coach")
}

fn cred() -> Option<&'static str> {
    Some(TOKEN)
}

async fn create_player(service: &Service, name: &str, email: &str) -> PlayerId {
    service
        .create_player(
            cred(),
            CreatePlayer {
                name: name.into(),
                email: email.into(),
            },
        )
        .await
        .expect("player should be accepted")
}

async fn create_game(service: &Service, name: &str) -> GameId {
    service
        .create_game(cred(), CreateGame { name: name.into() })
        .await
        .expect("game should be accepted")
}

async fn add_member(service: &Service, game_id: GameId, player_id: PlayerId) -> GameId {
    service
        .add_member(cred(), AddMember { game_id, player_id })
        .await
        .expect("member should be accepted")
}

// ---------------------------------------------------------------------------
// Gate ordering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_missing_credential_refused_before_validation() {
    let service = service();

    // The name would also fail validation; the gate answers first and
    // nothing is written.
    let err = service
        .create_player(
            None,
            CreatePlayer {
                name: "NOT HEX".into(),
                email: "nope".into(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        CommandError::Unauthenticated(AuthError::MissingCredential)
    );
    assert_eq!(err.reason_code(), ReasonCode::Unauthenticated);
    assert!(service.players().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_credential_refused() {
    let service = service();
    let err = service
        .create_game(Some("wrong"), CreateGame { name: "Cup".into() })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        CommandError::Unauthenticated(AuthError::InvalidCredential)
    );
}

#[tokio::test]
async fn test_all_three_commands_are_gated() {
    let service = service();

    assert!(matches!(
        service
            .create_player(None, CreatePlayer { name: "aa".into(), email: "a@b.com".into() })
            .await,
        Err(CommandError::Unauthenticated(_))
    ));
    assert!(matches!(
        service.create_game(None, CreateGame { name: "Cup".into() }).await,
        Err(CommandError::Unauthenticated(_))
    ));
    assert!(matches!(
        service
            .add_member(None, AddMember { game_id: GameId(1), player_id: PlayerId(1) })
            .await,
        Err(CommandError::Unauthenticated(_))
    ));
}

#[tokio::test]
async fn test_identify_returns_the_principal() {
    let service = service();
    let principal = service.identify(cred()).await.unwrap();
    assert_eq!(principal.subject, "coach");
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_player_assigns_ids_from_one() {
    let service = service();
    assert_eq!(create_player(&service, "deadbeef", "a@b.com").await, PlayerId(1));
    assert_eq!(create_player(&service, "c0ffee", "c@d.com").await, PlayerId(2));

    let record = service.player(PlayerId(1)).await.unwrap().unwrap();
    assert_eq!(record.name, "deadbeef");
    assert_eq!(record.email, "a@b.com");
}

#[tokio::test]
async fn test_create_game_starts_empty() {
    let service = service();
    let game_id = create_game(&service, "Cup").await;
    assert_eq!(game_id, GameId(1));

    let record = service.game(game_id).await.unwrap().unwrap();
    assert_eq!(record.name, "Cup");
    assert_eq!(record.member_count(), 0);
}

#[tokio::test]
async fn test_create_game_accepts_any_name() {
    let service = service();
    assert_eq!(create_game(&service, "").await, GameId(1));
    assert_eq!(create_game(&service, "Friday ⚽ 19:00").await, GameId(2));
}

#[tokio::test]
async fn test_add_member_echoes_the_game_id() {
    let service = service();
    let player_id = create_player(&service, "deadbeef", "a@b.com").await;
    let game_id = create_game(&service, "Cup").await;

    assert_eq!(add_member(&service, game_id, player_id).await, game_id);

    let record = service.game(game_id).await.unwrap().unwrap();
    assert!(record.has_member(player_id));
    assert_eq!(record.member_count(), 1);
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_duplicate_name_rejected_and_unwritten() {
    let service = service();
    create_player(&service, "deadbeef", "a@b.com").await;

    let err = service
        .create_player(
            cred(),
            CreatePlayer {
                name: "deadbeef".into(),
                email: "c@d.com".into(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        CommandError::Rejected(Rejection::DuplicateName {
            name: "deadbeef".into()
        })
    );
    assert_eq!(err.reason_code(), ReasonCode::DuplicateName);
    assert_eq!(service.players().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_email_rejected() {
    let service = service();
    let err = service
        .create_player(
            cred(),
            CreatePlayer {
                name: "c0ffee".into(),
                email: "nope".into(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.reason_code(), ReasonCode::InvalidEmailFormat);
}

#[tokio::test]
async fn test_add_member_twice_rejected_as_already_member() {
    let service = service();
    let player_id = create_player(&service, "deadbeef", "a@b.com").await;
    let game_id = create_game(&service, "Cup").await;
    add_member(&service, game_id, player_id).await;

    let err = service
        .add_member(cred(), AddMember { game_id, player_id })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        CommandError::Rejected(Rejection::AlreadyMember { game_id, player_id })
    );
    assert_eq!(service.game(game_id).await.unwrap().unwrap().member_count(), 1);
}

#[tokio::test]
async fn test_sixth_member_rejected_and_set_unchanged() {
    let service = service();
    let game_id = create_game(&service, "Cup").await;

    let mut ids = Vec::new();
    for i in 0..6 {
        ids.push(create_player(&service, &format!("{i:02x}"), &format!("p{i}@x.com")).await);
    }
    for &player_id in &ids[..5] {
        add_member(&service, game_id, player_id).await;
    }

    let err = service
        .add_member(cred(), AddMember { game_id, player_id: ids[5] })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        CommandError::Rejected(Rejection::GameFull {
            id: game_id,
            members: 5
        })
    );
    assert_eq!(service.game(game_id).await.unwrap().unwrap().member_count(), 5);
}

#[tokio::test]
async fn test_unknown_ids_rejected() {
    let service = service();
    let err = service
        .add_member(cred(), AddMember { game_id: GameId(1), player_id: PlayerId(1) })
        .await
        .unwrap_err();
    assert_eq!(err.reason_code(), ReasonCode::PlayerNotFound);

    let player_id = create_player(&service, "deadbeef", "a@b.com").await;
    let err = service
        .add_member(cred(), AddMember { game_id: GameId(9), player_id })
        .await
        .unwrap_err();
    assert_eq!(err.reason_code(), ReasonCode::GameNotFound);
}

#[tokio::test]
async fn test_rejection_maps_to_wire_body() {
    let service = service();
    create_player(&service, "deadbeef", "a@b.com").await;

    let err = service
        .create_player(
            cred(),
            CreatePlayer {
                name: "deadbeef".into(),
                email: "c@d.com".into(),
            },
        )
        .await
        .unwrap_err();
    let body = err.to_body();

    assert_eq!(body.code, ReasonCode::DuplicateName);
    assert!(body.message.contains("deadbeef"));

    // The JSON the HTTP layer would send, end to end.
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["code"], "duplicate_name");
}

// ---------------------------------------------------------------------------
// Retry driver
// ---------------------------------------------------------------------------

/// Store double that refuses the first `n` commits with a conflict and
/// delegates to a real in-memory store afterwards. The shared counter
/// lets a test read how many refusals were actually consumed.
struct ContendedStore {
    inner: MemoryStore,
    remaining: Arc<AtomicU32>,
}

impl ContendedStore {
    fn failing_first(n: u32) -> (Self, Arc<AtomicU32>) {
        let remaining = Arc::new(AtomicU32::new(n));
        let store = ContendedStore {
            inner: MemoryStore::new(),
            remaining: Arc::clone(&remaining),
        };
        (store, remaining)
    }
}

impl EntityStore for ContendedStore {
    async fn snapshot(&self) -> Result<Snapshot, StoreError> {
        self.inner.snapshot().await
    }

    async fn commit(&self, txn: Transaction) -> Result<Committed, StoreError> {
        let refuse = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if refuse {
            return Err(StoreError::Conflict(ConstraintKey::PlayerName(
                "contended".into(),
            )));
        }
        self.inner.commit(txn).await
    }
}

/// Instant retries; the tests here count attempts, not pauses.
fn instant_retry(max_attempts: u32) -> ServiceConfig {
    ServiceConfig {
        max_attempts,
        backoff_cap_ms: 0,
    }
}

#[tokio::test]
async fn test_conflicts_retried_until_commit() {
    let (store, remaining) = ContendedStore::failing_first(3);
    let service = LineupService::with_config(store, gate(), instant_retry(8));

    let id = service
        .create_player(
            cred(),
            CreatePlayer {
                name: "deadbeef".into(),
                email: "a@b.com".into(),
            },
        )
        .await
        .expect("fourth attempt should commit");

    assert_eq!(id, PlayerId(1));
    assert_eq!(remaining.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_exhausted_conflicts_surface_store_contention() {
    let (store, remaining) = ContendedStore::failing_first(100);
    let service = LineupService::with_config(store, gate(), instant_retry(2));

    let err = service
        .create_game(cred(), CreateGame { name: "Cup".into() })
        .await
        .unwrap_err();

    assert!(matches!(err, CommandError::Store(StoreError::Conflict(_))));
    assert_eq!(err.reason_code(), ReasonCode::StoreContention);
    // Exactly two attempts were made, no more.
    assert_eq!(remaining.load(Ordering::SeqCst), 98);
}

#[tokio::test]
async fn test_zero_max_attempts_still_makes_one() {
    let (store, remaining) = ContendedStore::failing_first(1);
    let service = LineupService::with_config(store, gate(), instant_retry(0));

    let err = service
        .create_game(cred(), CreateGame { name: "Cup".into() })
        .await
        .unwrap_err();

    assert_eq!(err.reason_code(), ReasonCode::StoreContention);
    assert_eq!(remaining.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rejection_returns_without_retrying() {
    // A rejection must not burn attempts: the single conflict refusal
    // stays unconsumed because validation never reaches commit.
    let (store, remaining) = ContendedStore::failing_first(1);
    let service = LineupService::with_config(store, gate(), instant_retry(8));

    let err = service
        .create_player(
            cred(),
            CreatePlayer {
                name: "NOT HEX".into(),
                email: "a@b.com".into(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.reason_code(), ReasonCode::InvalidNameCharset);
    assert_eq!(remaining.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_players_listed_id_ascending() {
    let service = service();
    create_player(&service, "aa", "aa@x.com").await;
    create_player(&service, "bb", "bb@x.com").await;
    create_player(&service, "cc", "cc@x.com").await;

    let names: Vec<_> = service
        .players()
        .await
        .unwrap()
        .into_iter()
        .map(|r| (r.id, r.name))
        .collect();
    assert_eq!(
        names,
        vec![
            (PlayerId(1), "aa".to_string()),
            (PlayerId(2), "bb".to_string()),
            (PlayerId(3), "cc".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_missing_rows_read_as_none() {
    let service = service();
    assert!(service.player(PlayerId(1)).await.unwrap().is_none());
    assert!(service.game(GameId(1)).await.unwrap().is_none());
    assert!(service.games().await.unwrap().is_empty());
}
