pub mod ledger;
pub mod participant;
pub mod session;
pub mod stats;
pub mod vote;

pub use ledger::VoteLedger;
pub use participant::{normalize_handle, Participant};
pub use session::{SessionState, SharedSession, VotingSession};
pub use stats::{rank_participants, StatsReport};
pub use vote::{scan_vote_tokens, Tally, Vote};

use thiserror::Error;

/// Reasons a vote was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VotingError {
    #[error("'{0}' is not on the roster")]
    UnknownParticipant(String),
    #[error("no voting round is active")]
    Inactive,
}
