//! Participant routes — join, list, heartbeat.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::requester::Requester;
use crate::services::clock;
use crate::services::presence::{self, PresenceError};
use crate::state::AppState;
use crate::store::Participant;

#[derive(Deserialize)]
pub struct RegisterBody {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub updated: bool,
}

/// `POST /participants` — join the room under a new name.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<Participant>), StatusCode> {
    let participant = presence::register(
        state.store.as_ref(),
        &body.name,
        clock::now_ms(),
        state.config.announce_presence,
    )
    .await
    .map_err(presence_error_to_status)?;
    Ok((StatusCode::CREATED, Json(participant)))
}

/// `GET /participants` — list everyone currently present.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Participant>>, StatusCode> {
    let participants = presence::list_active(state.store.as_ref())
        .await
        .map_err(presence_error_to_status)?;
    Ok(Json(participants))
}

/// `POST /status` — heartbeat for the participant named in the `User` header.
pub async fn status(
    State(state): State<AppState>,
    Requester(name): Requester,
) -> Result<Json<StatusResponse>, StatusCode> {
    let updated = presence::heartbeat(state.store.as_ref(), &name, clock::now_ms())
        .await
        .map_err(presence_error_to_status)?;
    Ok(Json(StatusResponse { updated }))
}

pub(crate) fn presence_error_to_status(err: PresenceError) -> StatusCode {
    match err {
        PresenceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PresenceError::Conflict(_) => StatusCode::CONFLICT,
        PresenceError::NotFound(_) => StatusCode::NOT_FOUND,
        PresenceError::Store(e) => {
            error!(error = %e, "presence store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "participants_test.rs"]
mod tests;
