use super::HandlerResult;
use crate::services::SessionCoordinator;
use std::sync::Arc;
use teloxide::types::PollAnswer;

pub async fn poll_answer_handler(
    answer: PollAnswer,
    coordinator: Arc<SessionCoordinator>,
) -> HandlerResult {
    coordinator
        .record_poll_answer(answer.user.username.as_deref(), &answer.option_ids)
        .await;
    Ok(())
}
