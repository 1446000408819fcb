//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the chat HTTP endpoints under a single Axum router.
//! Handlers translate requests into service calls and map service errors
//! onto status codes; the services themselves know nothing about HTTP.

pub mod messages;
pub mod participants;
pub mod requester;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full API router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/participants", get(participants::list).post(participants::register))
        .route("/status", post(participants::status))
        .route("/messages", get(messages::list).post(messages::post_message))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
