#![allow(dead_code, clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use game_poll_bot::services::{
    BroadcastError, Broadcaster, CoordinatorSettings, SessionCoordinator,
};
use game_poll_bot::storage::RosterStore;
use game_poll_bot::voting::{Participant, SharedSession, Tally, VotingSession};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use teloxide::types::ChatId;
use tempfile::TempDir;
use tokio::sync::mpsc;

pub const ADMIN: &str = "adventurer_v";
pub const CHAT: ChatId = ChatId(-100_123);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text {
        chat_id: i64,
        text: String,
    },
    Poll {
        chat_id: i64,
        question: String,
        options: Vec<String>,
        anonymous: bool,
    },
}

/// Records everything the bot tries to send and mirrors it onto a channel.
pub struct RecordingBroadcaster {
    sent: Mutex<Vec<Sent>>,
    tx: mpsc::UnboundedSender<Sent>,
    failing: AtomicBool,
    poll_delay: Mutex<Duration>,
}

impl RecordingBroadcaster {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<Sent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let broadcaster = Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            tx,
            failing: AtomicBool::new(false),
            poll_delay: Mutex::new(Duration::ZERO),
        });
        (broadcaster, rx)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Makes every poll send take `delay` before it completes.
    pub fn set_poll_delay(&self, delay: Duration) {
        *self.poll_delay.lock().unwrap() = delay;
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text),
                Sent::Poll { .. } => None,
            })
            .collect()
    }

    fn record(&self, sent: Sent) -> Result<(), BroadcastError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BroadcastError::Rejected("test sink is failing".to_string()));
        }
        self.sent.lock().unwrap().push(sent.clone());
        let _ = self.tx.send(sent);
        Ok(())
    }
}

#[async_trait]
impl Broadcaster for RecordingBroadcaster {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), BroadcastError> {
        self.record(Sent::Text {
            chat_id: chat_id.0,
            text: text.to_string(),
        })
    }

    async fn send_poll(
        &self,
        chat_id: ChatId,
        question: &str,
        options: &[String],
        anonymous: bool,
    ) -> Result<(), BroadcastError> {
        let delay = *self.poll_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.record(Sent::Poll {
            chat_id: chat_id.0,
            question: question.to_string(),
            options: options.to_vec(),
            anonymous,
        })
    }
}

pub fn roster(handles: &[&str]) -> Vec<Participant> {
    handles
        .iter()
        .map(|h| Participant::new(*h, Tally::default()))
        .collect()
}

pub fn shared_session(handles: &[&str], deadline: DateTime<Tz>) -> SharedSession {
    VotingSession::new(roster(handles), deadline).into_shared()
}

pub fn settings(persist_on_stop: bool) -> CoordinatorSettings {
    CoordinatorSettings {
        admin_username: ADMIN.to_string(),
        timezone: chrono_tz::Europe::Moscow,
        reminder_lead: chrono::Duration::hours(1),
        persist_on_stop,
    }
}

/// Everything a coordinator test needs, with the roster file in a temp dir.
pub struct Fixture {
    pub coordinator: Arc<SessionCoordinator>,
    pub broadcaster: Arc<RecordingBroadcaster>,
    pub rx: mpsc::UnboundedReceiver<Sent>,
    pub store: RosterStore,
    pub dir: TempDir,
}

pub fn fixture(
    roster_file: &str,
    deadline: DateTime<Tz>,
    persist_on_stop: bool,
) -> Fixture {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("users");
    std::fs::write(&path, roster_file).unwrap();

    let store = RosterStore::new(&path);
    let participants = store.load().unwrap();
    let session = VotingSession::new(participants, deadline).into_shared();
    let (broadcaster, rx) = RecordingBroadcaster::new();

    let coordinator = Arc::new(SessionCoordinator::new(
        session,
        broadcaster.clone(),
        store.clone(),
        settings(persist_on_stop),
    ));

    Fixture {
        coordinator,
        broadcaster,
        rx,
        store,
        dir,
    }
}
