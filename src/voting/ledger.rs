use super::participant::{normalize_handle, Participant};
use super::vote::{Tally, Vote};
use super::VotingError;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Entry {
    participant: Participant,
    vote: Vote,
}

/// Live votes for the current round, plus each participant's history.
///
/// Entries keep roster load order. The live counts always add up to the
/// number of participants.
#[derive(Debug, Clone)]
pub struct VoteLedger {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
    counts: Tally,
}

impl VoteLedger {
    /// Builds a ledger where everybody starts out abstaining.
    ///
    /// A handle listed twice keeps its first entry.
    pub fn new(participants: Vec<Participant>) -> Self {
        let mut entries = Vec::with_capacity(participants.len());
        let mut index = HashMap::with_capacity(participants.len());

        for participant in participants {
            let key = participant.key().to_string();
            if index.contains_key(&key) {
                tracing::warn!("Duplicate roster handle '{}' ignored", participant.handle);
                continue;
            }
            index.insert(key, entries.len());
            entries.push(Entry {
                participant,
                vote: Vote::None,
            });
        }

        let counts = Tally::new(0, 0, entries.len() as i64);
        Self {
            entries,
            index,
            counts,
        }
    }

    /// Records `vote` for `handle`.
    ///
    /// The previous vote loses one in both the live counts and the
    /// participant's history, the new vote gains one in both. Returns
    /// `Ok(false)` when the vote is unchanged.
    pub fn set_vote(&mut self, handle: &str, vote: Vote) -> Result<bool, VotingError> {
        let idx = *self
            .index
            .get(normalize_handle(handle))
            .ok_or_else(|| VotingError::UnknownParticipant(handle.to_string()))?;

        let entry = &mut self.entries[idx];
        let previous = entry.vote;
        if previous == vote {
            return Ok(false);
        }

        entry.vote = vote;
        entry.participant.history.shift(previous, vote);
        self.counts.shift(previous, vote);
        Ok(true)
    }

    /// Puts everybody back to abstaining. History is left alone.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.vote = Vote::None;
        }
        self.counts = Tally::new(0, 0, self.entries.len() as i64);
    }

    pub fn tally(&self, vote: Vote) -> usize {
        self.counts.get(vote).max(0) as usize
    }

    pub fn counts(&self) -> Tally {
        self.counts
    }

    /// Participants currently holding `vote`, in roster order.
    pub fn participants_with(&self, vote: Vote) -> Vec<&Participant> {
        self.entries
            .iter()
            .filter(|e| e.vote == vote)
            .map(|e| &e.participant)
            .collect()
    }

    pub fn vote_of(&self, handle: &str) -> Option<Vote> {
        self.index
            .get(normalize_handle(handle))
            .map(|&idx| self.entries[idx].vote)
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.index.contains_key(normalize_handle(handle))
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.entries.iter().map(|e| &e.participant)
    }

    /// Every participant as a chat mention, in roster order.
    pub fn mentions(&self) -> Vec<String> {
        self.participants().map(Participant::mention).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
