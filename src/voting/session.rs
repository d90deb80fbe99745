use super::ledger::VoteLedger;
use super::participant::Participant;
use super::stats::{rank_participants, StatsReport};
use super::vote::Vote;
use super::VotingError;
use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The session as shared between the dispatcher, the notifier and the health endpoint.
pub type SharedSession = Arc<Mutex<VotingSession>>;

/// Lifecycle of the single voting round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active {
        /// Id of the chat message that started the round.
        message_id: i32,
        started_at: DateTime<Tz>,
    },
}

/// The one voting round this process runs, and the ledger behind it.
#[derive(Debug)]
pub struct VotingSession {
    ledger: VoteLedger,
    state: SessionState,
    /// Set once the roster is loaded; independent of whether a round is running.
    ready: bool,
    deadline: DateTime<Tz>,
    unknown_votes: u64,
}

impl VotingSession {
    /// Creates an idle session over `participants`, everybody abstaining.
    ///
    /// `deadline` is computed once by the caller and never moves, even across
    /// restarts of the round.
    pub fn new(participants: Vec<Participant>, deadline: DateTime<Tz>) -> Self {
        Self {
            ledger: VoteLedger::new(participants),
            state: SessionState::Idle,
            ready: true,
            deadline,
            unknown_votes: 0,
        }
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    /// Opens a round. Calling this on an active session restarts it.
    ///
    /// Returns `true` when a previous round was replaced.
    pub fn start(&mut self, message_id: i32, now: DateTime<Tz>) -> bool {
        let restarted = self.is_active();
        self.ledger.reset();
        self.state = SessionState::Active {
            message_id,
            started_at: now,
        };
        restarted
    }

    /// Closes the round. Returns whether one was running.
    pub fn stop(&mut self) -> bool {
        let was_active = self.is_active();
        self.ledger.reset();
        self.state = SessionState::Idle;
        was_active
    }

    /// Applies an answer from `handle`; only accepted while a round is running.
    pub fn record_answer(&mut self, handle: &str, vote: Vote) -> Result<bool, VotingError> {
        if !self.is_active() {
            return Err(VotingError::Inactive);
        }
        let result = self.ledger.set_vote(handle, vote);
        if matches!(result, Err(VotingError::UnknownParticipant(_))) {
            self.unknown_votes += 1;
        }
        result
    }

    /// Counts an answer whose sender could not be identified at all.
    ///
    /// Returns `false` (and counts nothing) while idle, like `record_answer`.
    pub fn record_unattributed(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.unknown_votes += 1;
        true
    }

    pub fn stats(&self) -> StatsReport {
        StatsReport {
            counts: self.ledger.counts(),
            ranking: rank_participants(self.ledger.participants()),
            active: self.is_active(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn message_id(&self) -> Option<i32> {
        match self.state {
            SessionState::Active { message_id, .. } => Some(message_id),
            SessionState::Idle => None,
        }
    }

    pub fn started_at(&self) -> Option<DateTime<Tz>> {
        match self.state {
            SessionState::Active { started_at, .. } => Some(started_at),
            SessionState::Idle => None,
        }
    }

    /// Time since the round opened, or `None` when idle.
    pub fn elapsed_since_start(&self, now: DateTime<Tz>) -> Option<Duration> {
        self.started_at().map(|started| now.signed_duration_since(started))
    }

    pub fn deadline(&self) -> DateTime<Tz> {
        self.deadline
    }

    /// Votes received from handles that are not on the roster.
    pub fn unknown_votes(&self) -> u64 {
        self.unknown_votes
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    pub fn mentions(&self) -> Vec<String> {
        self.ledger.mentions()
    }

    /// Current roster with up-to-date history, ready to be saved.
    pub fn roster_snapshot(&self) -> Vec<Participant> {
        self.ledger.participants().cloned().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::voting::Tally;
    use chrono::TimeZone;
    use chrono_tz::Europe::Moscow;

    fn session() -> VotingSession {
        let deadline = Moscow.with_ymd_and_hms(2024, 5, 10, 23, 0, 0).unwrap();
        VotingSession::new(
            vec![
                Participant::new("alice", Tally::default()),
                Participant::new("bob", Tally::default()),
            ],
            deadline,
        )
    }

    fn noon() -> DateTime<Tz> {
        Moscow.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_session_is_ready_but_idle() {
        let session = session();
        assert!(session.is_ready());
        assert!(!session.is_active());
        assert_eq!(session.state(), &SessionState::Idle);
        assert_eq!(session.ledger().tally(Vote::None), 2);
    }

    #[test]
    fn test_answers_ignored_while_idle() {
        let mut session = session();
        assert_eq!(
            session.record_answer("alice", Vote::Yes),
            Err(VotingError::Inactive)
        );
        assert_eq!(session.ledger().tally(Vote::Yes), 0);
        assert_eq!(session.roster_snapshot()[0].history, Tally::default());
    }

    #[test]
    fn test_start_records_trigger_and_time() {
        let mut session = session();
        assert!(!session.start(42, noon()));
        assert_eq!(session.message_id(), Some(42));
        assert_eq!(session.started_at(), Some(noon()));

        let later = noon() + Duration::minutes(15);
        assert_eq!(session.elapsed_since_start(later), Some(Duration::minutes(15)));
    }

    #[test]
    fn test_restart_resets_votes() {
        let mut session = session();
        session.start(1, noon());
        session.record_answer("alice", Vote::Yes).ok();

        assert!(session.start(2, noon()));
        assert_eq!(session.message_id(), Some(2));
        assert_eq!(session.ledger().tally(Vote::Yes), 0);
        assert_eq!(session.ledger().tally(Vote::None), 2);
    }

    #[test]
    fn test_stop_clears_round_keeps_history() {
        let mut session = session();
        session.start(1, noon());
        session.record_answer("bob", Vote::No).ok();

        assert!(session.stop());
        assert!(!session.is_active());
        assert_eq!(session.message_id(), None);
        assert_eq!(session.ledger().tally(Vote::None), 2);
        assert_eq!(session.roster_snapshot()[1].history, Tally::new(0, 1, -1));
        assert!(!session.stop());
    }

    #[test]
    fn test_unknown_votes_are_counted() {
        let mut session = session();
        session.start(1, noon());
        assert!(session.record_answer("mallory", Vote::Yes).is_err());
        assert!(session.record_answer("mallory", Vote::No).is_err());
        assert_eq!(session.unknown_votes(), 2);
        assert_eq!(session.ledger().tally(Vote::None), 2);
    }

    #[test]
    fn test_unattributed_answers_count_only_while_active() {
        let mut session = session();
        assert!(!session.record_unattributed());
        assert_eq!(session.unknown_votes(), 0);

        session.start(1, noon());
        assert!(session.record_unattributed());
        assert_eq!(session.unknown_votes(), 1);
        assert_eq!(session.ledger().tally(Vote::None), 2);
    }

    #[test]
    fn test_stats_ranks_by_history() {
        let deadline = Moscow.with_ymd_and_hms(2024, 5, 10, 23, 0, 0).unwrap();
        let session = VotingSession::new(
            vec![
                Participant::new("alice", Tally::new(1, 0, 4)),
                Participant::new("bob", Tally::new(6, 2, 0)),
            ],
            deadline,
        );
        let report = session.stats();
        assert!(!report.active);
        assert_eq!(report.ranking[0].handle, "bob");
        assert_eq!(report.counts, Tally::new(0, 0, 2));
    }
}
