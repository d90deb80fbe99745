use super::vote::Tally;
use serde::{Deserialize, Serialize};

/// A roster member eligible to vote, with their all-time tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Handle exactly as written in the roster file.
    pub handle: String,
    pub history: Tally,
}

impl Participant {
    pub fn new(handle: impl Into<String>, history: Tally) -> Self {
        Self {
            handle: handle.into(),
            history,
        }
    }

    /// Lookup key: the handle without a leading `@`.
    pub fn key(&self) -> &str {
        normalize_handle(&self.handle)
    }

    /// Chat mention form, e.g. `@alice`.
    pub fn mention(&self) -> String {
        format!("@{}", self.key())
    }
}

/// Strips the mention sigil so that `alice` and `@alice` resolve to the same participant.
pub fn normalize_handle(handle: &str) -> &str {
    handle.strip_prefix('@').unwrap_or(handle)
}
