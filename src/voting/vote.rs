use serde::{Deserialize, Serialize};
use std::fmt;

/// A participant's current stance in the running round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vote {
    Yes,
    No,
    /// Abstained, or withdrew an earlier answer.
    None,
}

impl Vote {
    pub const ALL: [Vote; 3] = [Vote::Yes, Vote::No, Vote::None];

    /// Maps a Telegram poll answer to a vote.
    ///
    /// The poll is posted with "yes" at index 0 and "no" at index 1. A retracted
    /// answer arrives with no option at all and counts as a withdrawal, as does
    /// any index the poll never offered.
    pub fn from_poll_option(option: Option<i32>) -> Self {
        match option {
            Some(0) => Vote::Yes,
            Some(1) => Vote::No,
            _ => Vote::None,
        }
    }

    /// Maps a free-text token (`+` or `-`) to a vote.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(Vote::Yes),
            "-" => Some(Vote::No),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Vote::Yes => "yes",
            Vote::No => "no",
            Vote::None => "none",
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracts every vote token from a chat message, in the order they appear.
///
/// Tokens must stand alone between whitespace: `"+"` counts, `"+1"` does not.
/// Callers apply the result in order, so the last token wins.
pub fn scan_vote_tokens(text: &str) -> Vec<Vote> {
    text.split_whitespace().filter_map(Vote::from_token).collect()
}

/// Per-option counters, used both for the live round and for history.
///
/// Signed on purpose: history is adjusted by moves between options, and a
/// withdrawal from a state that was never credited can go below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub yes: i64,
    pub no: i64,
    pub abstain: i64,
}

impl Tally {
    pub fn new(yes: i64, no: i64, abstain: i64) -> Self {
        Self { yes, no, abstain }
    }

    pub fn get(&self, vote: Vote) -> i64 {
        match vote {
            Vote::Yes => self.yes,
            Vote::No => self.no,
            Vote::None => self.abstain,
        }
    }

    fn slot(&mut self, vote: Vote) -> &mut i64 {
        match vote {
            Vote::Yes => &mut self.yes,
            Vote::No => &mut self.no,
            Vote::None => &mut self.abstain,
        }
    }

    /// Moves one unit from `from` to `to`.
    pub fn shift(&mut self, from: Vote, to: Vote) {
        *self.slot(from) -= 1;
        *self.slot(to) += 1;
    }

    pub fn total(&self) -> i64 {
        self.yes + self.no + self.abstain
    }
}
