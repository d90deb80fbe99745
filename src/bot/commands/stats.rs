use crate::services::SessionCoordinator;
use crate::utils::logging::log_command_start;
use teloxide::prelude::*;

/// `/stats` is open to everybody and never changes state.
pub async fn handle_stats(msg: &Message, coordinator: &SessionCoordinator) {
    let user = msg
        .from()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");
    log_command_start("/stats", user, msg.chat.id.0, None);
    coordinator.print_stats(msg.chat.id).await;
}
