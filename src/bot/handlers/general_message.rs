use super::HandlerResult;
use crate::services::SessionCoordinator;
use std::sync::Arc;
use teloxide::prelude::*;

/// Any other message: look for standalone `+` / `-` tokens and count them as votes.
pub async fn handle_general_message(
    msg: Message,
    coordinator: Arc<SessionCoordinator>,
) -> HandlerResult {
    if let Some(text) = msg.text() {
        let username = msg.from().and_then(|u| u.username.as_deref());
        coordinator.record_text_votes(username, text).await;
    }
    Ok(())
}
