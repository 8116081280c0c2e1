//! Failure taxonomy for commands.
//!
//! Three families, kept deliberately distinct because callers react to
//! each differently:
//!
//! - [`CommandError::Unauthenticated`]: fix the credential and resend.
//! - [`CommandError::Rejected`]: the command itself is wrong; resending
//!   it unchanged will be rejected again.
//! - [`CommandError::Store`]: the command was fine but the store could
//!   not take it; resending the identical command may succeed.

use thiserror::Error;

use lineup_auth::AuthError;
use lineup_protocol::{ErrorBody, GameId, PlayerId, ReasonCode};
use lineup_store::StoreError;

// ---------------------------------------------------------------------------
// Rejection — a named validation failure
// ---------------------------------------------------------------------------

/// One violated validation rule. Terminal and user-correctable: no
/// retry will help, but a corrected command may pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Another player already holds this name.
    #[error("player name {name:?} is already taken")]
    DuplicateName { name: String },

    /// The name contains a character outside `0-9a-f`.
    #[error("player name may only use the hex digit characters 0-9a-f")]
    InvalidNameCharset,

    /// The name is over the length cap.
    #[error("player name is longer than {max} characters")]
    NameTooLong { max: usize },

    /// The email does not look like `local@domain.tld`.
    #[error("email address is not in local@domain.tld form")]
    InvalidEmailFormat,

    /// Another player already registered this email.
    #[error("email address {email:?} is already registered")]
    DuplicateEmail { email: String },

    /// The email is over the length cap.
    #[error("email address is longer than {max} characters")]
    EmailTooLong { max: usize },

    /// No player row with this id.
    #[error("player {id} does not exist")]
    PlayerNotFound { id: PlayerId },

    /// No game row with this id.
    #[error("game {id} does not exist")]
    GameNotFound { id: GameId },

    /// The game's member set is at capacity.
    #[error("game {id} already has {members} members")]
    GameFull { id: GameId, members: usize },

    /// The player is already in the game's member set.
    #[error("player {player_id} is already a member of game {game_id}")]
    AlreadyMember {
        game_id: GameId,
        player_id: PlayerId,
    },
}

impl Rejection {
    /// The wire code for this rejection.
    pub fn reason_code(&self) -> ReasonCode {
        match self {
            Rejection::DuplicateName { .. } => ReasonCode::DuplicateName,
            Rejection::InvalidNameCharset => ReasonCode::InvalidNameCharset,
            Rejection::NameTooLong { .. } => ReasonCode::NameTooLong,
            Rejection::InvalidEmailFormat => ReasonCode::InvalidEmailFormat,
            Rejection::DuplicateEmail { .. } => ReasonCode::DuplicateEmail,
            Rejection::EmailTooLong { .. } => ReasonCode::EmailTooLong,
            Rejection::PlayerNotFound { .. } => ReasonCode::PlayerNotFound,
            Rejection::GameNotFound { .. } => ReasonCode::GameNotFound,
            Rejection::GameFull { .. } => ReasonCode::GameFull,
            Rejection::AlreadyMember { .. } => ReasonCode::AlreadyMember,
        }
    }
}

// ---------------------------------------------------------------------------
// CommandError — everything a command can fail with
// ---------------------------------------------------------------------------

/// Any failure a command can return.
///
/// There is no `From<StoreError>`: store failures enter only through
/// the retry driver, which decides whether to retry before surfacing
/// one here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The credential was missing, unknown, or expired. Checked before
    /// any validation, so a bad credential never learns which rules a
    /// command would have violated.
    #[error("unauthenticated: {0}")]
    Unauthenticated(#[from] AuthError),

    /// A validation rule rejected the command. Nothing was written.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// The store refused every attempt.
    #[error("store failure: {0}")]
    Store(#[source] StoreError),
}

impl CommandError {
    /// The wire code for this failure.
    pub fn reason_code(&self) -> ReasonCode {
        match self {
            CommandError::Unauthenticated(_) => ReasonCode::Unauthenticated,
            CommandError::Rejected(rejection) => rejection.reason_code(),
            CommandError::Store(err) if err.is_transient() => ReasonCode::StoreContention,
            CommandError::Store(_) => ReasonCode::Internal,
        }
    }

    /// Builds the wire error body for this failure.
    ///
    /// Auth failures and rejections carry their own message. Store
    /// failures get a fixed message: backend detail stays in the logs.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            CommandError::Store(err) if err.is_transient() => ErrorBody::new(
                ReasonCode::StoreContention,
                "store is busy, retry the command",
            ),
            CommandError::Store(_) => ErrorBody::new(ReasonCode::Internal, "internal error"),
            other => ErrorBody::new(other.reason_code(), other.to_string()),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
