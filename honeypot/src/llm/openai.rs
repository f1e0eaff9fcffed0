//! OpenAI-compatible Chat Completions client implementing [`LlmClient`].
//!
//! Uses `OPENAI_API_KEY` (and `OPENAI_BASE_URL` / `OPENAI_API_BASE` when set) by default, so any
//! provider exposing an OpenAI-compatible endpoint can serve as the judgement capability.
//!
//! When [`CompletionOptions::json_schema`] is set the request carries
//! `response_format = {"type": "json_schema", ...}`; the schema is sent non-strict because the
//! verdict's `explanation` is optional, and the caller validates the payload anyway.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs, ResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::HoneypotError;
use crate::llm::{CompletionOptions, LlmClient, LlmResponse, LlmUsage};
use crate::message::Message;

/// OpenAI Chat Completions client.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(Self::config_from_env()),
            model: model.into(),
        }
    }

    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
        }
    }

    /// Default config plus the base URL from `OPENAI_BASE_URL` or `OPENAI_API_BASE`, if set.
    fn config_from_env() -> OpenAIConfig {
        let config = OpenAIConfig::new();
        match Self::base_url_from_env() {
            Some(base) => config.with_api_base(base),
            None => config,
        }
    }

    fn base_url_from_env() -> Option<String> {
        std::env::var("OPENAI_BASE_URL")
            .or_else(|_| std::env::var("OPENAI_API_BASE"))
            .ok()
            .map(|b| b.trim_end_matches('/').to_string())
            .filter(|b| !b.is_empty())
    }

    /// Chat completions URL used for logging. Does not append /v1 when base already ends with /v1.
    fn chat_completions_url() -> String {
        let base =
            Self::base_url_from_env().unwrap_or_else(|| "https://api.openai.com".to_string());
        if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }

    /// Convert our `Message` list to OpenAI request messages.
    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant(s) => {
                    ChatCompletionRequestMessage::Assistant((s.as_str()).into())
                }
            })
            .collect()
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<LlmResponse, HoneypotError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(Self::messages_to_request(messages));

        if let Some(t) = options.temperature {
            args.temperature(t);
        }

        if let Some(ref format) = options.json_schema {
            args.response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    name: format.name.clone(),
                    description: format.description.clone(),
                    schema: Some(format.schema.clone()),
                    strict: Some(false),
                },
            });
        }

        let request = args
            .build()
            .map_err(|e| HoneypotError::Upstream(format!("OpenAI request build failed: {}", e)))?;

        let url = Self::chat_completions_url();
        debug!(
            trace_id = %trace_id,
            url = %url,
            model = %self.model,
            message_count = messages.len(),
            temperature = ?options.temperature,
            json_schema = options.json_schema.as_ref().map(|s| s.name.as_str()),
            "OpenAI chat create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(trace_id = %trace_id, request = %js, "OpenAI request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| HoneypotError::Upstream(format!("OpenAI API error: {}", e)))?;

        if let Ok(js) = serde_json::to_string_pretty(&response) {
            trace!(trace_id = %trace_id, response = %js, "OpenAI response body");
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| HoneypotError::Upstream("OpenAI returned no choices".to_string()))?;

        let usage = response.usage.map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        if let Some(ref u) = usage {
            debug!(trace_id = %trace_id, total_tokens = u.total_tokens, "OpenAI usage");
        }

        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
            usage,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
