//! Message routes — post and read the chat log.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use tracing::error;

use super::requester::Requester;
use crate::services::clock;
use crate::services::message::{self, MessageError};
use crate::state::AppState;
use crate::store::{Message, MessageKind};

#[derive(Deserialize)]
pub struct PostMessageBody {
    pub to: String,
    pub text: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
}

#[derive(Deserialize, Default)]
pub struct ListMessagesQuery {
    /// Kept as a raw string so non-numeric values mean "no limit" instead of a 400.
    pub limit: Option<String>,
}

/// `POST /messages` — append a message from the `User` header's participant.
pub async fn post_message(
    State(state): State<AppState>,
    Requester(from): Requester,
    Json(body): Json<PostMessageBody>,
) -> Result<(StatusCode, Json<Message>), StatusCode> {
    let Ok(kind) = body.kind.trim().parse::<MessageKind>() else {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    };

    let stored = message::post(state.store.as_ref(), &from, &body.to, &body.text, kind, clock::now_ms())
        .await
        .map_err(message_error_to_status)?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// `GET /messages?limit=N` — messages visible to the requester, newest first.
pub async fn list(
    State(state): State<AppState>,
    Requester(requester): Requester,
    Query(query): Query<ListMessagesQuery>,
) -> Result<Json<Vec<Message>>, StatusCode> {
    let limit = message::parse_limit(query.limit.as_deref());
    let messages = message::list_visible(state.store.as_ref(), &requester, limit)
        .await
        .map_err(message_error_to_status)?;
    Ok(Json(messages))
}

pub(crate) fn message_error_to_status(err: MessageError) -> StatusCode {
    match err {
        MessageError::Validation(_) | MessageError::InvalidSender(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MessageError::Store(e) => {
            error!(error = %e, "message store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "messages_test.rs"]
mod tests;
