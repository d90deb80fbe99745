pub mod general_message;
pub mod message;
pub mod poll_answer;

use teloxide::{dispatching::UpdateHandler, prelude::*, types::PollAnswer};
use crate::bot::commands::Command;
use crate::services::SessionCoordinator;
use std::sync::Arc;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;

pub struct BotHandler {
    pub coordinator: Arc<SessionCoordinator>,
}

impl BotHandler {
    pub fn new(coordinator: Arc<SessionCoordinator>) -> Self {
        Self { coordinator }
    }

    /// Commands first, so that `/start` is never scanned for vote tokens.
    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        let commands = self.coordinator.clone();
        let texts = self.coordinator.clone();
        let answers = self.coordinator.clone();

        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let coordinator = commands.clone();
                        async move { message::command_handler(bot, msg, cmd, coordinator).await }
                    }),
            )
            .branch(Update::filter_message().endpoint(move |msg: Message| {
                let coordinator = texts.clone();
                async move { general_message::handle_general_message(msg, coordinator).await }
            }))
            .branch(Update::filter_poll_answer().endpoint(move |answer: PollAnswer| {
                let coordinator = answers.clone();
                async move { poll_answer::poll_answer_handler(answer, coordinator).await }
            }))
    }
}
