//! Message service — posting and per-reader visibility.
//!
//! DESIGN
//! ======
//! The log is append-only and ordered by insertion. Reads pull the whole log
//! and filter it for the requesting name: broadcasts and status notices are
//! visible to everyone, private messages only to their sender and recipient.
//! Results come back newest first, truncated to the requested limit.

use tracing::info;

use crate::services::clock;
use crate::store::{ChatStore, Message, MessageKind, StoreError};

/// Recipient used for messages addressed to the whole room.
pub const BROADCAST_TARGET: &str = "All";

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("invalid message: {0}")]
    Validation(String),
    #[error("sender is not a registered participant: {0}")]
    InvalidSender(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

// =============================================================================
// VISIBILITY
// =============================================================================

/// Whether `message` may be shown to `requester`.
#[must_use]
pub fn is_visible(message: &Message, requester: &str) -> bool {
    matches!(message.kind, MessageKind::Broadcast | MessageKind::Status)
        || message.from == requester
        || message.to == requester
}

/// Filter a chronological log for `requester`, newest first.
///
/// `limit = None` returns every visible message; `Some(0)` returns none.
#[must_use]
pub fn select_visible(log: Vec<Message>, requester: &str, limit: Option<usize>) -> Vec<Message> {
    log.into_iter()
        .rev()
        .filter(|m| is_visible(m, requester))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Interpret a raw `limit` query value. Absent or non-numeric means no limit.
#[must_use]
pub fn parse_limit(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Build a system join/leave notice for `name`.
#[must_use]
pub fn status_notice(name: &str, text: &str, now: i64) -> Message {
    Message {
        from: name.to_owned(),
        to: BROADCAST_TARGET.to_owned(),
        text: text.to_owned(),
        kind: MessageKind::Status,
        time: clock::clock_time(now),
    }
}

/// Append a user message to the log.
///
/// # Errors
///
/// Returns `Validation` for empty fields or a non-user `kind`,
/// `InvalidSender` if `from` is not registered, or `Store` on I/O failure.
/// Nothing is written on error.
pub async fn post(
    store: &dyn ChatStore,
    from: &str,
    to: &str,
    text: &str,
    kind: MessageKind,
    now: i64,
) -> Result<Message, MessageError> {
    let to = to.trim();
    if to.is_empty() {
        return Err(MessageError::Validation("recipient must not be empty".into()));
    }
    if text.trim().is_empty() {
        return Err(MessageError::Validation("text must not be empty".into()));
    }
    if kind == MessageKind::Status {
        return Err(MessageError::Validation("status messages are system-generated".into()));
    }

    if store.find_participant(from).await?.is_none() {
        return Err(MessageError::InvalidSender(from.to_owned()));
    }

    let message = Message {
        from: from.to_owned(),
        to: to.to_owned(),
        text: text.to_owned(),
        kind,
        time: clock::clock_time(now),
    };
    store.insert_message(&message).await?;
    info!(from = %message.from, to = %message.to, kind = message.kind.as_str(), "message stored");

    Ok(message)
}

/// Messages visible to `requester`, newest first, at most `limit` of them.
///
/// # Errors
///
/// Returns `Store` on I/O failure.
pub async fn list_visible(
    store: &dyn ChatStore,
    requester: &str,
    limit: Option<usize>,
) -> Result<Vec<Message>, MessageError> {
    let log = store.list_messages().await?;
    Ok(select_visible(log, requester, limit))
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
