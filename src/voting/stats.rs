use super::participant::Participant;
use super::vote::Tally;
use serde::Serialize;
use std::cmp::Reverse;

/// Snapshot returned by `/stats`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    /// Live counts for the current (or last reset) round.
    pub counts: Tally,
    /// All participants, best attendance first.
    pub ranking: Vec<Participant>,
    pub active: bool,
}

/// Orders participants by yes, then no, then abstain, all descending.
///
/// The sort is stable, so ties stay in roster order.
pub fn rank_participants<'a, I>(participants: I) -> Vec<Participant>
where
    I: IntoIterator<Item = &'a Participant>,
{
    let mut ranked: Vec<Participant> = participants.into_iter().cloned().collect();
    ranked.sort_by_key(|p| {
        (
            Reverse(p.history.yes),
            Reverse(p.history.no),
            Reverse(p.history.abstain),
        )
    });
    ranked
}
