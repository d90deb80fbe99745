use super::HandlerResult;
use crate::bot::commands::{session_management, stats, Command};
use crate::services::SessionCoordinator;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    coordinator: Arc<SessionCoordinator>,
) -> HandlerResult {
    // Vote tokens count in any message, commands included.
    if let Some(text) = msg.text() {
        let username = msg.from().and_then(|u| u.username.as_deref());
        coordinator.record_text_votes(username, text).await;
    }

    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string()).await?;
        }
        Command::Start => {
            session_management::handle_start(&msg, &coordinator).await;
        }
        Command::Stop => {
            session_management::handle_stop(&msg, &coordinator).await;
        }
        Command::Stats => {
            stats::handle_stats(&msg, &coordinator).await;
        }
        Command::SetEndTime => {
            session_management::handle_set_end_time(&msg, &coordinator);
        }
    }
    Ok(())
}
