//! `POST /api/v1/engage`: one stateless judgement per request.
//!
//! The caller sends the new scammer message plus the history it has kept so far; the response
//! is the verdict JSON. Authentication runs before the body is looked at.

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};
use honeypot::{Sender, Turn, Verdict};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::app::AppState;
use crate::error::{ApiError, INVALID_JSON_MESSAGE, MISSING_MESSAGE};

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Validated engage request.
#[derive(Debug)]
pub struct EngageRequest {
    pub message: String,
    pub history: Vec<Turn>,
}

/// One history entry as posted by callers. `role` / `content` are accepted as aliases.
#[derive(Deserialize)]
struct HistoryEntry {
    #[serde(alias = "role")]
    sender: Sender,
    #[serde(alias = "content")]
    text: String,
}

/// Checks `X-API-KEY` against the configured key.
pub fn authorize(headers: &HeaderMap, api_key: &str) -> Result<(), ApiError> {
    match headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        Some(given) if given == api_key => Ok(()),
        _ => Err(ApiError::Unauthorized),
    }
}

impl EngageRequest {
    /// Parses the raw body. An empty body is treated as `{}`.
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Default::default())
        } else {
            serde_json::from_slice(body)
                .map_err(|_| ApiError::Validation(INVALID_JSON_MESSAGE.to_string()))?
        };
        let Value::Object(mut fields) = value else {
            return Err(ApiError::Validation(INVALID_JSON_MESSAGE.to_string()));
        };

        let message = match fields.remove("message") {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            _ => return Err(ApiError::Validation(MISSING_MESSAGE.to_string())),
        };

        let history = match fields.remove("history") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => history_turns(entries),
            Some(other) => {
                warn!(kind = json_kind(&other), "ignoring non-array history");
                Vec::new()
            }
        };

        Ok(Self { message, history })
    }
}

fn history_turns(entries: Vec<Value>) -> Vec<Turn> {
    let total = entries.len();
    let turns: Vec<Turn> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<HistoryEntry>(entry) {
            Ok(e) => Some(Turn::from_parts(e.sender, e.text)),
            Err(err) => {
                warn!(index, error = %err, "skipping unrecognised history entry");
                None
            }
        })
        .collect();
    if turns.len() < total {
        debug!(kept = turns.len(), total, "history entries filtered");
    }
    turns
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) async fn handle_engage(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Verdict>, ApiError> {
    if let Err(e) = authorize(&headers, state.api_key()) {
        warn!("engage rejected: bad or missing api key");
        return Err(e);
    }
    let request = EngageRequest::parse(&body)?;
    debug!(
        history_len = request.history.len(),
        message_len = request.message.len(),
        "engage request"
    );

    let verdict = state
        .processor()
        .try_process(&request.history, &request.message)
        .await
        .map_err(|e| {
            warn!(error = %e, "engage judgement failed");
            ApiError::from(e)
        })?;

    info!(
        classification = %verdict.classification,
        current_state = %verdict.current_state,
        confidence = verdict.confidence_score,
        "engage verdict"
    );
    Ok(Json(verdict))
}
