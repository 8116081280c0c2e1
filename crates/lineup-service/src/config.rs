//! Tuning knobs for the command pipeline.

/// Configuration for the command pipeline.
///
/// Controls how hard the service fights store contention before giving
/// up. The defaults suit the in-memory store, where conflicts resolve
/// in microseconds; a backend with real round-trip latency wants a
/// larger backoff cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Most validate-then-commit attempts per command before the
    /// command fails with a transient store error.
    ///
    /// Default: 8. A command always makes at least one attempt, so 0
    /// is treated as 1.
    pub max_attempts: u32,

    /// Upper bound, in milliseconds, on the random pause between
    /// attempts.
    ///
    /// Default: 5. Set to 0 to retry immediately.
    pub backoff_cap_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            backoff_cap_ms: 5,
        }
    }
}
