use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),
    #[error("message rejected: {0}")]
    Rejected(String),
}

/// Outbound side of the bot: where texts and polls go.
///
/// Sends are awaited once. Callers log failures and move on; nothing is retried.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), BroadcastError>;

    async fn send_poll(
        &self,
        chat_id: ChatId,
        question: &str,
        options: &[String],
        anonymous: bool,
    ) -> Result<(), BroadcastError>;
}

/// Sends through the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramBroadcaster {
    bot: Bot,
}

impl TelegramBroadcaster {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Broadcaster for TelegramBroadcaster {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), BroadcastError> {
        self.bot.send_message(chat_id, text).await?;
        Ok(())
    }

    async fn send_poll(
        &self,
        chat_id: ChatId,
        question: &str,
        options: &[String],
        anonymous: bool,
    ) -> Result<(), BroadcastError> {
        self.bot
            .send_poll(chat_id, question, options.to_vec())
            .is_anonymous(anonymous)
            .await?;
        Ok(())
    }
}
