//! Error types for the auth layer.

/// Errors a gate or the token registry can produce.
///
/// Every variant maps to the single `Unauthenticated` category at the
/// command surface; the distinctions exist for logs and for callers that
/// want to tell "log in again" apart from "you never logged in".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No credential accompanied the command. Raised by the service
    /// before any gate runs; gates themselves only see presented
    /// credentials.
    #[error("no credential presented")]
    MissingCredential,

    /// The credential is not one this gate recognizes.
    /// Could be a stale token, a typo, or a guess.
    #[error("credential not recognized")]
    InvalidCredential,

    /// The credential was once valid but its lifetime has passed.
    /// The caller must log in again.
    #[error("credential expired")]
    ExpiredCredential,

    /// The username/password pair was rejected at login.
    #[error("bad username or password")]
    BadLogin,
}
