//! Turn processor: history + new scammer message → [`Verdict`].
//!
//! Serializes the conversation into a transcript, calls the judgement capability with the
//! verdict schema and parses the result strictly. Two entry points share that pipeline:
//!
//! - [`TurnProcessor::try_process`] returns a typed error (used by the HTTP surface, which
//!   reports failures as 500).
//! - [`TurnProcessor::process`] never fails: every error becomes [`Verdict::fallback`]. This
//!   is the error boundary for the chat-facing session.
//!
//! The processor holds no mutable state; callers append turns and merge intel themselves.

mod prompt;
mod schema;

pub use prompt::{render_transcript, SYSTEM_INSTRUCTION};
pub use schema::{parse_verdict, verdict_schema, VERDICT_SCHEMA_NAME};

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::HoneypotError;
use crate::llm::{CompletionOptions, LlmClient};
use crate::turn::Turn;
use crate::verdict::Verdict;

/// Explanation carried by the fallback verdict.
pub const FALLBACK_EXPLANATION: &str = "API Error occurred.";

/// Default sampling temperature for judgement calls.
pub const DEFAULT_JUDGE_TEMPERATURE: f32 = 0.7;

/// Produces one verdict per scammer message.
pub struct TurnProcessor {
    llm: Arc<dyn LlmClient>,
    temperature: Option<f32>,
    timeout: Option<Duration>,
}

impl TurnProcessor {
    /// Processor with the default temperature and no timeout.
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            temperature: Some(DEFAULT_JUDGE_TEMPERATURE),
            timeout: None,
        }
    }

    /// Set temperature (builder).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set a per-call timeout (builder); `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Runs the judgement pipeline and returns the parsed verdict or the typed failure.
    ///
    /// `history` is the conversation before `new_message`; it may be empty.
    pub async fn try_process(
        &self,
        history: &[Turn],
        new_message: &str,
    ) -> Result<Verdict, HoneypotError> {
        let new_message = new_message.trim();
        if new_message.is_empty() {
            return Err(HoneypotError::EmptyMessage);
        }
        let messages = prompt::build_judgement_prompt(history, new_message, &verdict_schema());
        let mut options = CompletionOptions::default().with_json_schema(schema::verdict_format());
        options.temperature = self.temperature;

        debug!(
            model = %self.llm.model_name(),
            history_len = history.len(),
            "turn processor invoking judgement"
        );
        let call = self.llm.invoke(&messages, &options);
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| HoneypotError::Timeout(limit))??,
            None => call.await?,
        };

        let verdict = parse_verdict(&response.content)?;
        debug!(
            classification = %verdict.classification,
            current_state = %verdict.current_state,
            confidence = verdict.confidence_score,
            "turn processed"
        );
        Ok(verdict)
    }

    /// Like [`try_process`](Self::try_process) but degrades every failure to the fallback verdict.
    pub async fn process(&self, history: &[Turn], new_message: &str) -> Verdict {
        match self.try_process(history, new_message).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(error = %e, "turn processing failed; returning fallback verdict");
                Verdict::fallback(FALLBACK_EXPLANATION)
            }
        }
    }
}
