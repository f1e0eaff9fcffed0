//! Axum app: shared state and router.
//!
//! Routes: `POST /api/v1/engage` (see [`crate::engage`]) and `GET /health`.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use honeypot::TurnProcessor;
use serde::Serialize;
use std::sync::Arc;

use crate::engage::handle_engage;

pub const ENGAGE_PATH: &str = "/api/v1/engage";
pub const HEALTH_PATH: &str = "/health";

/// Shared state for the HTTP server.
///
/// The processor holds no per-conversation state, so one instance serves every request.
#[derive(Clone)]
pub struct AppState {
    processor: Arc<TurnProcessor>,
    api_key: Arc<str>,
}

impl AppState {
    pub fn new(processor: Arc<TurnProcessor>, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            processor,
            api_key: api_key.into(),
        }
    }

    pub fn processor(&self) -> &TurnProcessor {
        &self.processor
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    /// `None` when the per-call timeout is disabled.
    pub turn_timeout_secs: Option<u64>,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.processor.model_name().to_string(),
        turn_timeout_secs: state.processor.timeout().map(|d| d.as_secs()),
    })
}

/// Builds the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(handle_health))
        .route(ENGAGE_PATH, post(handle_engage))
        .with_state(state)
}
