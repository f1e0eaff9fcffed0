//! LLM client abstraction for the external judgement capability.
//!
//! The turn processor and the adversary generator depend on a callable that takes prompt
//! messages and returns completion text; this module defines the trait, the OpenAI-compatible
//! client and a scripted mock.
//!
//! Structured output is requested per call through [`CompletionOptions::json_schema`]; the
//! caller still validates the returned text, since providers differ in how strictly they honour
//! the schema.

mod mock;
mod openai;

pub use mock::MockLlm;
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::HoneypotError;
use crate::message::Message;

/// Token usage for one LLM call (prompt + completion).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Response from one completion.
#[derive(Clone, Debug, Default)]
pub struct LlmResponse {
    /// Assistant message content (plain text or JSON when a schema was requested).
    pub content: String,
    /// Token usage, when the provider reports it.
    pub usage: Option<LlmUsage>,
}

/// JSON-schema output format for one call.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonSchemaFormat {
    /// Schema name as sent to the provider (`[a-zA-Z0-9_-]`).
    pub name: String,
    pub description: Option<String>,
    pub schema: serde_json::Value,
}

/// Per-call completion settings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompletionOptions {
    /// Sampling temperature (0–2). `None` leaves the provider default.
    pub temperature: Option<f32>,
    /// When set, ask the provider for JSON conforming to this schema.
    pub json_schema: Option<JsonSchemaFormat>,
}

impl CompletionOptions {
    /// Set temperature (builder).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Request JSON output matching `format` (builder).
    pub fn with_json_schema(mut self, format: JsonSchemaFormat) -> Self {
        self.json_schema = Some(format);
        self
    }
}

/// LLM client: given messages, returns the assistant's completion text.
///
/// Implementations: [`ChatOpenAI`] (real API), [`MockLlm`] (scripted, for tests and offline demos).
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one completion.
    async fn invoke(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<LlmResponse, HoneypotError>;

    /// Model name for logs and health output.
    fn model_name(&self) -> &str;
}
