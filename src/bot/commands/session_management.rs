use crate::services::{CommandOutcome, SessionCoordinator};
use teloxide::prelude::*;

fn sender_username(msg: &Message) -> Option<&str> {
    msg.from().and_then(|u| u.username.as_deref())
}

pub async fn handle_start(msg: &Message, coordinator: &SessionCoordinator) -> CommandOutcome {
    coordinator
        .start(sender_username(msg), msg.chat.id, msg.id.0)
        .await
}

pub async fn handle_stop(msg: &Message, coordinator: &SessionCoordinator) -> CommandOutcome {
    coordinator.stop(sender_username(msg), msg.chat.id).await
}

/// Placeholder: the deadline is fixed at startup. Only logs who asked.
pub fn handle_set_end_time(msg: &Message, coordinator: &SessionCoordinator) -> CommandOutcome {
    let username = sender_username(msg);
    if !coordinator.is_admin(username) {
        crate::utils::logging::log_command_denied(
            "/setendtime",
            username.unwrap_or("unknown"),
            msg.chat.id.0,
        );
        return CommandOutcome::Unauthorized;
    }
    tracing::info!("/setendtime is not supported; the deadline is fixed at startup");
    CommandOutcome::Applied
}
