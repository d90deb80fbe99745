use crate::services::broadcast::Broadcaster;
use crate::services::notifier::{DeadlineNotifier, NotifierHandle};
use crate::storage::RosterStore;
use crate::utils::datetime::now_in;
use crate::utils::logging::{
    log_command_denied, log_command_start, log_command_success, log_send_error, log_vote,
    log_vote_anomaly,
};
use crate::utils::messages::{mention_all, poll_options, stats_text, POLL_QUESTION};
use crate::voting::{normalize_handle, scan_vote_tokens, SharedSession, Vote, VotingError};
use chrono_tz::Tz;
use std::sync::Arc;
use teloxide::types::ChatId;
use tokio::sync::Mutex;

/// What happened to a privileged command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// Sender is not the administrator; nothing changed.
    Unauthorized,
    /// Stop was requested with no round running.
    NotActive,
}

/// Settings the coordinator needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct CoordinatorSettings {
    pub admin_username: String,
    pub timezone: Tz,
    pub reminder_lead: chrono::Duration,
    pub persist_on_stop: bool,
}

/// Funnels every session change through one place: commands, answers,
/// stats, the deadline notifier and persisting history.
pub struct SessionCoordinator {
    session: SharedSession,
    broadcaster: Arc<dyn Broadcaster>,
    store: RosterStore,
    settings: CoordinatorSettings,
    notifier: Mutex<Option<NotifierHandle>>,
}

impl SessionCoordinator {
    pub fn new(
        session: SharedSession,
        broadcaster: Arc<dyn Broadcaster>,
        store: RosterStore,
        settings: CoordinatorSettings,
    ) -> Self {
        Self {
            session,
            broadcaster,
            store,
            settings,
            notifier: Mutex::new(None),
        }
    }

    pub fn session(&self) -> SharedSession {
        self.session.clone()
    }

    /// Exact, case-sensitive match against the configured administrator.
    pub fn is_admin(&self, username: Option<&str>) -> bool {
        username.is_some_and(|u| u == normalize_handle(&self.settings.admin_username))
    }

    /// Opens (or restarts) the round, announces it and arms the deadline reminder.
    pub async fn start(
        &self,
        username: Option<&str>,
        chat_id: ChatId,
        message_id: i32,
    ) -> CommandOutcome {
        let user = username.unwrap_or("unknown");
        if !self.is_admin(username) {
            log_command_denied("/start", user, chat_id.0);
            return CommandOutcome::Unauthorized;
        }
        log_command_start("/start", user, chat_id.0, None);

        let now = now_in(self.settings.timezone);
        let (mentions, deadline, restarted) = {
            let mut session = self.session.lock().await;
            let restarted = session.start(message_id, now);
            (session.mentions(), session.deadline(), restarted)
        };
        if restarted {
            tracing::info!("Active round restarted by {}", user);
        }

        self.send_text(chat_id, &mention_all(&mentions), "mention").await;
        if let Err(e) = self
            .broadcaster
            .send_poll(chat_id, POLL_QUESTION, &poll_options(), false)
            .await
        {
            log_send_error("poll", chat_id.0, &e.to_string());
        }

        // Alarms are measured from after the sends.
        let notifier = DeadlineNotifier::new(
            self.session.clone(),
            self.broadcaster.clone(),
            chat_id,
            self.settings.reminder_lead,
        )
        .spawn(now_in(self.settings.timezone), deadline);
        if let Some(previous) = self.notifier.lock().await.replace(notifier) {
            previous.cancel();
        }

        log_command_success("/start", user, chat_id.0, Some(&format!("{} participants", mentions.len())));
        CommandOutcome::Applied
    }

    /// Closes the round and cancels the pending reminder.
    pub async fn stop(&self, username: Option<&str>, chat_id: ChatId) -> CommandOutcome {
        let user = username.unwrap_or("unknown");
        if !self.is_admin(username) {
            log_command_denied("/stop", user, chat_id.0);
            return CommandOutcome::Unauthorized;
        }
        log_command_start("/stop", user, chat_id.0, None);

        let (was_active, snapshot) = {
            let mut session = self.session.lock().await;
            let was_active = session.stop();
            (was_active, session.roster_snapshot())
        };
        self.cancel_notifier().await;

        if !was_active {
            tracing::info!("/stop with no active round");
            return CommandOutcome::NotActive;
        }

        if self.settings.persist_on_stop {
            self.persist(&snapshot);
        }

        log_command_success("/stop", user, chat_id.0, None);
        CommandOutcome::Applied
    }

    /// Handles a poll answer. An empty `option_ids` is a retracted vote.
    pub async fn record_poll_answer(&self, username: Option<&str>, option_ids: &[i32]) -> bool {
        let vote = Vote::from_poll_option(option_ids.first().copied());
        self.apply_vote("poll", username, vote).await
    }

    /// Applies every `+` / `-` token in `text`, in order. Returns how many votes changed.
    pub async fn record_text_votes(&self, username: Option<&str>, text: &str) -> usize {
        let mut applied = 0;
        for vote in scan_vote_tokens(text) {
            if self.apply_vote("text", username, vote).await {
                applied += 1;
            }
        }
        applied
    }

    async fn apply_vote(&self, source: &str, username: Option<&str>, vote: Vote) -> bool {
        let Some(user) = username else {
            if self.session.lock().await.record_unattributed() {
                log_vote_anomaly(source, "<no username>", "sender has no username");
            }
            return false;
        };

        let result = self.session.lock().await.record_answer(user, vote);
        match result {
            Ok(changed) => {
                if changed {
                    log_vote(source, user, vote.as_str());
                }
                changed
            }
            Err(VotingError::Inactive) => {
                tracing::debug!("Ignoring {} vote from {}: {}", source, user, VotingError::Inactive);
                false
            }
            Err(e @ VotingError::UnknownParticipant(_)) => {
                log_vote_anomaly(source, user, &e.to_string());
                false
            }
        }
    }

    /// Broadcasts the live counts and the all-time ranking.
    pub async fn print_stats(&self, chat_id: ChatId) {
        let report = self.session.lock().await.stats();
        self.send_text(chat_id, &stats_text(&report), "stats").await;
    }

    /// Graceful shutdown: cancels the reminder and saves history if a round is running.
    pub async fn shutdown(&self) {
        self.cancel_notifier().await;

        let snapshot = {
            let session = self.session.lock().await;
            session.is_active().then(|| session.roster_snapshot())
        };
        if let Some(snapshot) = snapshot {
            self.persist(&snapshot);
        }
    }

    async fn cancel_notifier(&self) {
        if let Some(handle) = self.notifier.lock().await.take() {
            handle.cancel();
        }
    }

    fn persist(&self, snapshot: &[crate::voting::Participant]) {
        match self.store.save(snapshot) {
            Ok(()) => tracing::info!("Saved vote history for {} participants", snapshot.len()),
            Err(e) => tracing::error!("Failed to save vote history: {}", e),
        }
    }

    async fn send_text(&self, chat_id: ChatId, text: &str, kind: &str) {
        if let Err(e) = self.broadcaster.send_text(chat_id, text).await {
            log_send_error(kind, chat_id.0, &e.to_string());
        }
    }
}
