//! Pure validation rules for the three mutating commands.
//!
//! Each predicate reads one [`Snapshot`] and returns either an accepted
//! value or a [`Rejection`] naming the first violated rule. Nothing here
//! writes: the service commits the accepted value afterwards, bound to
//! the same snapshot, and the store refuses the commit if a conflicting
//! write landed in between.
//!
//! The accepted-value types have private fields. The only way to obtain
//! one is through its predicate, so holding a [`NewPlayer`] is proof the
//! rules ran.

use std::sync::LazyLock;

use regex::Regex;

use lineup_protocol::{GameId, PlayerId};
use lineup_store::{Mutation, Snapshot};

use crate::error::Rejection;

/// Longest accepted player name, in characters.
pub const NAME_MAX_CHARS: usize = 54;

/// Longest accepted email address, in characters.
pub const EMAIL_MAX_CHARS: usize = 54;

/// `local@domain.tld` shape. Deliberately loose: one `@`, a dotted
/// domain, word characters plus `.` and `-` on both sides. Anything
/// fancier belongs to a mail delivery attempt, not a format rule.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("email pattern is valid")
});

/// Player names are restricted to lowercase hex digit characters.
fn is_hex_lower(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='f')
}

// ---------------------------------------------------------------------------
// Accepted values
// ---------------------------------------------------------------------------

/// A player creation that passed every rule against one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    name: String,
    email: String,
}

impl NewPlayer {
    /// The accepted name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The accepted email.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn into_mutation(self) -> Mutation {
        Mutation::InsertPlayer {
            name: self.name,
            email: self.email,
        }
    }
}

/// A game creation ready to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGame {
    name: String,
}

impl NewGame {
    /// The accepted name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_mutation(self) -> Mutation {
        Mutation::InsertGame { name: self.name }
    }
}

/// A membership addition that passed every rule against one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewMember {
    game_id: GameId,
    player_id: PlayerId,
}

impl NewMember {
    /// The game gaining a member.
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    /// The player being added.
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub(crate) fn into_mutation(self) -> Mutation {
        Mutation::AppendMember {
            game_id: self.game_id,
            player_id: self.player_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Checks a player creation request against one snapshot.
///
/// Rules run in a fixed order and the first failure wins: name length,
/// name charset, name uniqueness, then email length, email format,
/// email uniqueness. Format runs before uniqueness so a malformed email
/// is reported as malformed even when an identical row already exists.
pub fn validate_player_creation(
    snapshot: &Snapshot,
    name: &str,
    email: &str,
) -> Result<NewPlayer, Rejection> {
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(Rejection::NameTooLong { max: NAME_MAX_CHARS });
    }
    if !name.chars().all(is_hex_lower) {
        return Err(Rejection::InvalidNameCharset);
    }
    if snapshot.player_by_name(name).is_some() {
        return Err(Rejection::DuplicateName {
            name: name.to_owned(),
        });
    }

    if email.chars().count() > EMAIL_MAX_CHARS {
        return Err(Rejection::EmailTooLong {
            max: EMAIL_MAX_CHARS,
        });
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(Rejection::InvalidEmailFormat);
    }
    if snapshot.player_by_email(email).is_some() {
        return Err(Rejection::DuplicateEmail {
            email: email.to_owned(),
        });
    }

    Ok(NewPlayer {
        name: name.to_owned(),
        email: email.to_owned(),
    })
}

/// Checks a game creation request.
///
/// Game names carry no rules: any string is accepted, including the
/// empty one, and names need not be unique. The predicate keeps the
/// same accept/reject shape as the other two so the service drives all
/// three commands through one pipeline.
pub fn validate_game_creation(name: &str) -> Result<NewGame, Rejection> {
    Ok(NewGame {
        name: name.to_owned(),
    })
}

/// Checks a membership addition against one snapshot.
///
/// Order: the player must exist, the game must exist, the game must
/// have a free slot, and the player must not already be a member. The
/// capacity rule reads the pre-addition count, so a game is full at
/// exactly [`ROSTER_CAP`](lineup_store::ROSTER_CAP) members and the
/// accepted append brings it to at most that.
pub fn validate_membership(
    snapshot: &Snapshot,
    game_id: GameId,
    player_id: PlayerId,
) -> Result<NewMember, Rejection> {
    if snapshot.player(player_id).is_none() {
        return Err(Rejection::PlayerNotFound { id: player_id });
    }
    let Some(game) = snapshot.game(game_id) else {
        return Err(Rejection::GameNotFound { id: game_id });
    };
    if game.is_full() {
        return Err(Rejection::GameFull {
            id: game_id,
            members: game.member_count(),
        });
    }
    if game.has_member(player_id) {
        return Err(Rejection::AlreadyMember { game_id, player_id });
    }

    Ok(NewMember { game_id, player_id })
}

// =========================================================================
// Tests
// =========================================================================
