//! Response bodies: acknowledgements, rejections, and reason codes.
//!
//! Every command answers with one of two shapes:
//!
//! ```text
//! accepted  → { "status": "success", "id": 7, "success": true }
//! rejected  → { "status": "error", "code": "game_full", "message": "..." }
//! ```
//!
//! The `code` field is the machine-readable half of a rejection: clients
//! branch on it, dashboards count it. The `message` field is the
//! human-readable half: shown to users, never parsed. Keeping both on
//! every rejection is a hard rule — a rejection with only prose forces
//! clients to string-match.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::id::{GameId, PlayerId};

// ---------------------------------------------------------------------------
// Status — the coarse success/error flag
// ---------------------------------------------------------------------------

/// Coarse outcome flag carried by every response body.
///
/// `#[serde(rename_all = "lowercase")]` makes the JSON form `"success"` /
/// `"error"` — lowercase strings, matching what clients already key on.
/// An enum rather than a `String` so a typo'd status cannot be
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The command committed.
    Success,
    /// The command was rejected; see the accompanying code.
    Error,
}

// ---------------------------------------------------------------------------
// ReasonCode — machine-readable rejection tags
// ---------------------------------------------------------------------------

/// Machine-readable tag identifying exactly which rule rejected a command.
///
/// One variant per rejection in the contract, plus the two non-validation
/// outcomes (`Unauthenticated`, `StoreContention`) and an `Internal`
/// catch-all that deliberately says nothing about what went wrong inside.
///
/// `#[serde(rename_all = "snake_case")]` gives the wire form:
/// `DuplicateName` → `"duplicate_name"`. Codes are append-only; renaming
/// one breaks every client that branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// Credential missing, unknown, or expired. Checked before any rule.
    Unauthenticated,
    /// A player with the requested name already exists.
    DuplicateName,
    /// The requested name uses characters outside `0-9a-f`.
    InvalidNameCharset,
    /// The requested name is longer than the 54-character cap.
    NameTooLong,
    /// The email does not look like `local@domain.tld`.
    InvalidEmailFormat,
    /// A player with the requested email already exists.
    DuplicateEmail,
    /// The email is longer than the 54-character cap.
    EmailTooLong,
    /// No player with the given id exists.
    PlayerNotFound,
    /// No game with the given id exists.
    GameNotFound,
    /// The game already holds the maximum of five members.
    GameFull,
    /// The player is already in the game's member set.
    AlreadyMember,
    /// The store kept conflicting after bounded retries; safe to retry
    /// the whole command.
    StoreContention,
    /// Unexpected internal failure; details stay in the server logs.
    Internal,
}

impl ReasonCode {
    /// The exact string that appears on the wire for this code.
    ///
    /// Kept in one place so log lines and JSON bodies can never disagree
    /// about a code's spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::Unauthenticated => "unauthenticated",
            ReasonCode::DuplicateName => "duplicate_name",
            ReasonCode::InvalidNameCharset => "invalid_name_charset",
            ReasonCode::NameTooLong => "name_too_long",
            ReasonCode::InvalidEmailFormat => "invalid_email_format",
            ReasonCode::DuplicateEmail => "duplicate_email",
            ReasonCode::EmailTooLong => "email_too_long",
            ReasonCode::PlayerNotFound => "player_not_found",
            ReasonCode::GameNotFound => "game_not_found",
            ReasonCode::GameFull => "game_full",
            ReasonCode::AlreadyMember => "already_member",
            ReasonCode::StoreContention => "store_contention",
            ReasonCode::Internal => "internal",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CommandAck — the success receipt
// ---------------------------------------------------------------------------

/// Acknowledgement body for a committed command.
///
/// Carries the id the command produced: the new player id, the new game
/// id, or the echoed game id for a membership add. The redundant
/// `success: true` field is part of the published shape and stays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandAck {
    /// Always [`Status::Success`] in an ack.
    pub status: Status,
    /// The id the command produced or echoed.
    pub id: u64,
    /// Always `true`; kept for shape compatibility.
    pub success: bool,
}

impl CommandAck {
    /// Ack carrying a raw id value.
    pub fn new(id: u64) -> Self {
        CommandAck {
            status: Status::Success,
            id,
            success: true,
        }
    }
}

impl From<PlayerId> for CommandAck {
    fn from(id: PlayerId) -> Self {
        CommandAck::new(id.0)
    }
}

impl From<GameId> for CommandAck {
    fn from(id: GameId) -> Self {
        CommandAck::new(id.0)
    }
}

// ---------------------------------------------------------------------------
// ErrorBody — the rejection receipt
// ---------------------------------------------------------------------------

/// Rejection body: a reason code plus a human-readable message.
///
/// Built by the service's error mapping, never assembled by hand at the
/// transport layer; that keeps code/message pairs consistent across every
/// surface that reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always [`Status::Error`] in a rejection.
    pub status: Status,
    /// Which rule or gate rejected the command.
    pub code: ReasonCode,
    /// Prose for humans. Never parsed, never stable.
    pub message: String,
}

impl ErrorBody {
    /// Rejection body for `code` with the given message.
    pub fn new(code: ReasonCode, message: impl Into<String>) -> Self {
        ErrorBody {
            status: Status::Error,
            code,
            message: message.into(),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
