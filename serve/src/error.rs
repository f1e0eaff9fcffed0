//! API error type and its JSON rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use honeypot::HoneypotError;
use serde_json::json;
use thiserror::Error;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Invalid API Key";
pub const MISSING_MESSAGE: &str = "Missing 'message' in request body";
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON in request body";
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Errors returned by the engage endpoint. Each maps to one status code and a fixed body shape.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// `X-API-KEY` absent or mismatched → 401.
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,
    /// Bad request body → 400 `{"error": <message>}`.
    #[error("{0}")]
    Validation(String),
    /// Judgement failed → 500 `{"error": "Internal Server Error", "details": <message>}`.
    #[error("{}: {0}", INTERNAL_MESSAGE)]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            ApiError::Unauthorized => json!({ "error": UNAUTHORIZED_MESSAGE }),
            ApiError::Validation(message) => json!({ "error": message }),
            ApiError::Internal(details) => json!({ "error": INTERNAL_MESSAGE, "details": details }),
        }
    }
}

impl From<HoneypotError> for ApiError {
    fn from(e: HoneypotError) -> Self {
        match e {
            HoneypotError::EmptyMessage => ApiError::Validation(MISSING_MESSAGE.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
