use tracing::{debug, error, info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_START: {} by {} in chat {} - {}", command, user, chat_id, d),
        None => info!("CMD_START: {} by {} in chat {}", command, user, chat_id),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, user: &str, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_SUCCESS: {} by {} in chat {} - {}", command, user, chat_id, d),
        None => info!("CMD_SUCCESS: {} by {} in chat {}", command, user, chat_id),
    }
}

/// Logs a privileged command refused to a non-admin sender
pub fn log_command_denied(command: &str, user: &str, chat_id: i64) {
    warn!("CMD_DENIED: {} by {} in chat {} - not the administrator", command, user, chat_id);
}

/// Logs an applied vote
pub fn log_vote(source: &str, user: &str, vote: &str) {
    debug!("VOTE: {} voted {} via {}", user, vote, source);
}

/// Logs a vote that could not be attributed to a roster member
pub fn log_vote_anomaly(source: &str, user: &str, reason: &str) {
    warn!("VOTE_ANOMALY: {} vote from {} dropped - {}", source, user, reason);
}

/// Logs a failed outbound message
pub fn log_send_error(kind: &str, chat_id: i64, error: &str) {
    error!("SEND_ERROR: {} to chat {} failed: {}", kind, chat_id, error);
}

/// Logs roster file operations with consistent format
pub fn log_store_operation(operation: &str, path: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("STORE_OP: {} on {} - {}", operation, path, d),
        None => debug!("STORE_OP: {} on {}", operation, path),
    }
}

/// Logs roster file errors with consistent format
pub fn log_store_error(operation: &str, path: &str, error: &str) {
    error!("STORE_ERROR: {} on {} failed: {}", operation, path, error);
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
