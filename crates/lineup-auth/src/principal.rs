//! The identity a gate attaches to a verified request.

use serde::{Deserialize, Serialize};

use std::fmt;

/// A verified identity.
///
/// Produced only by a gate; code holding a `Principal` may assume the
/// credential check already happened. Carries just the subject name — the
/// core attaches it to log lines and echoes it from the identity query,
/// nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// The account name the credential resolved to.
    pub subject: String,
}

impl Principal {
    /// Principal for `subject`.
    pub fn new(subject: impl Into<String>) -> Self {
        Principal {
            subject: subject.into(),
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.subject)
    }
}
