//! Error types for turn processing.
//!
//! Every failure of the judgement pipeline maps to one variant here. The chat-facing path
//! ([`TurnProcessor::process`](crate::TurnProcessor::process)) recovers all of them into the
//! fallback verdict; the API path surfaces them.

use std::time::Duration;

use thiserror::Error;

/// Failure while producing a verdict for one turn.
#[derive(Debug, Error)]
pub enum HoneypotError {
    /// The new scammer message was empty (after trimming); no external call is made.
    #[error("message must be non-empty")]
    EmptyMessage,

    /// The external judgement call failed (transport, auth, provider error).
    #[error("upstream call failed: {0}")]
    Upstream(String),

    /// The external judgement call did not finish within the configured timeout.
    #[error("upstream call timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The external output was not valid JSON or did not match the verdict schema.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
