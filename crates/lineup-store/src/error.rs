//! Error type for store operations.

use thiserror::Error;

use crate::txn::ConstraintKey;

/// Errors a store can return from `snapshot` or `commit`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Another commit stamped a touched constraint key after this
    /// transaction's basis. The validation that fed the transaction may
    /// be stale; re-validate on a fresh snapshot and try again.
    #[error("write conflict on {0}")]
    Conflict(ConstraintKey),

    /// A write reached commit that would break a table invariant. With a
    /// correctly used validate-then-commit flow this does not happen; it
    /// exists so a misused store refuses to corrupt itself.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// The backend could not serve the request at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether retrying the whole validate-then-commit sequence can
    /// succeed. Only conflicts are worth retrying; integrity and
    /// availability failures will repeat.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineup_protocol::GameId;

    #[test]
    fn test_conflict_names_the_contested_key() {
        let err = StoreError::Conflict(ConstraintKey::PlayerName("deadbeef".into()));
        assert_eq!(err.to_string(), "write conflict on player-name \"deadbeef\"");
    }

    #[test]
    fn test_only_conflicts_are_transient() {
        assert!(StoreError::Conflict(ConstraintKey::GameRoster(GameId(1))).is_transient());
        assert!(!StoreError::Integrity("dup".into()).is_transient());
        assert!(!StoreError::Unavailable("down".into()).is_transient());
    }
}
