use crate::services::broadcast::Broadcaster;
use crate::utils::datetime::format_datetime;
use crate::utils::logging::{log_send_error, log_system_event};
use crate::utils::messages::reminder_text;
use crate::voting::SharedSession;
use chrono::DateTime;
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Duration;
use teloxide::types::ChatId;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

/// Why the notifier task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierExit {
    DeadlinePassed,
    Cancelled,
}

/// Owner's side of a running notifier.
pub struct NotifierHandle {
    token: CancellationToken,
    task: JoinHandle<NotifierExit>,
}

impl NotifierHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Waits for the task to end. `None` if it panicked or was aborted.
    pub async fn join(self) -> Option<NotifierExit> {
        match self.task.await {
            Ok(exit) => Some(exit),
            Err(e) => {
                tracing::error!("Deadline notifier task failed: {}", e);
                None
            }
        }
    }
}

/// Reminds everybody once, `lead` before the deadline, then waits out the deadline.
pub struct DeadlineNotifier {
    session: SharedSession,
    broadcaster: Arc<dyn Broadcaster>,
    chat_id: ChatId,
    lead: chrono::Duration,
}

impl DeadlineNotifier {
    pub fn new(
        session: SharedSession,
        broadcaster: Arc<dyn Broadcaster>,
        chat_id: ChatId,
        lead: chrono::Duration,
    ) -> Self {
        Self {
            session,
            broadcaster,
            chat_id,
            lead,
        }
    }

    /// Starts the task. Both alarms are measured from `now`, taken as the
    /// current time at the moment of the call.
    pub fn spawn(self, now: DateTime<Tz>, deadline: DateTime<Tz>) -> NotifierHandle {
        let token = CancellationToken::new();
        let anchor = Instant::now();
        let until_deadline = non_negative(deadline - now);
        let until_reminder = non_negative(deadline - self.lead - now);

        log_system_event(
            "Deadline notifier armed",
            Some(&format!(
                "chat {}, deadline {}, reminder in {}s",
                self.chat_id.0,
                format_datetime(&deadline),
                until_reminder.as_secs()
            )),
        );

        let task = tokio::spawn(self.run(
            token.clone(),
            anchor + until_reminder,
            anchor + until_deadline,
            until_deadline.is_zero(),
        ));

        NotifierHandle { token, task }
    }

    async fn run(
        self,
        token: CancellationToken,
        remind_at: Instant,
        deadline_at: Instant,
        already_over: bool,
    ) -> NotifierExit {
        if already_over {
            log_system_event("Deadline already passed, no reminder scheduled", None);
            return NotifierExit::DeadlinePassed;
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => return NotifierExit::Cancelled,
            _ = sleep_until(remind_at) => {}
        }
        self.send_reminder().await;

        tokio::select! {
            biased;
            _ = token.cancelled() => return NotifierExit::Cancelled,
            _ = sleep_until(deadline_at) => {}
        }
        log_system_event("Voting deadline reached", Some(&format!("chat {}", self.chat_id.0)));
        NotifierExit::DeadlinePassed
    }

    async fn send_reminder(&self) {
        let mentions = {
            let session = self.session.lock().await;
            if !session.is_active() {
                tracing::info!("Session no longer active, skipping deadline reminder");
                return;
            }
            session.mentions()
        };

        match self
            .broadcaster
            .send_text(self.chat_id, &reminder_text(&mentions, self.lead))
            .await
        {
            Ok(()) => tracing::info!("Sent deadline reminder to chat {}", self.chat_id.0),
            Err(e) => log_send_error("reminder", self.chat_id.0, &e.to_string()),
        }
    }
}

fn non_negative(delta: chrono::Duration) -> Duration {
    delta.to_std().unwrap_or(Duration::ZERO)
}
