//! Mock LLM for tests and offline demos.
//!
//! Returns scripted completions in order, then a repeating default. Records every prompt so
//! tests can assert on what was sent and how often the collaborator was called.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::HoneypotError;
use crate::llm::{CompletionOptions, LlmClient, LlmResponse};
use crate::message::Message;

/// Scripted [`LlmClient`].
///
/// Each call pops the next scripted outcome; once the script is exhausted every call returns
/// the default outcome. `Err` outcomes surface as [`HoneypotError::Upstream`].
pub struct MockLlm {
    script: Mutex<VecDeque<Result<String, String>>>,
    default: Result<String, String>,
    call_count: AtomicUsize,
    prompts: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Always returns `content`.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self::from_default(Ok(content.into()))
    }

    /// Always fails with an upstream error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_default(Err(message.into()))
    }

    /// Returns each scripted outcome once in order, then `content` forever.
    pub fn scripted(script: Vec<Result<String, String>>, content: impl Into<String>) -> Self {
        let mock = Self::from_default(Ok(content.into()));
        if let Ok(mut s) = mock.script.lock() {
            s.extend(script);
        }
        mock
    }

    fn from_default(default: Result<String, String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default,
            call_count: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of `invoke` calls so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Messages of the most recent call.
    pub fn last_prompt(&self) -> Option<Vec<Message>> {
        self.prompts.lock().ok().and_then(|p| p.last().cloned())
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(
        &self,
        messages: &[Message],
        _options: &CompletionOptions,
    ) -> Result<LlmResponse, HoneypotError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut p) = self.prompts.lock() {
            p.push(messages.to_vec());
        }
        let next = self
            .script
            .lock()
            .ok()
            .and_then(|mut s| s.pop_front())
            .unwrap_or_else(|| self.default.clone());
        match next {
            Ok(content) => Ok(LlmResponse {
                content,
                usage: None,
            }),
            Err(e) => Err(HoneypotError::Upstream(e)),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn with_content_repeats() {
        let llm = MockLlm::with_content("hi");
        let opts = CompletionOptions::default();
        assert_eq!(llm.invoke(&[], &opts).await.unwrap().content, "hi");
        assert_eq!(llm.invoke(&[], &opts).await.unwrap().content, "hi");
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn failing_returns_upstream_error() {
        let llm = MockLlm::failing("boom");
        let err = llm
            .invoke(&[], &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, HoneypotError::Upstream(m) if m == "boom"));
    }

    #[tokio::test]
    async fn scripted_then_default() {
        let llm = MockLlm::scripted(vec![Err("first".into()), Ok("second".into())], "rest");
        let opts = CompletionOptions::default();
        assert!(llm.invoke(&[], &opts).await.is_err());
        assert_eq!(llm.invoke(&[], &opts).await.unwrap().content, "second");
        assert_eq!(llm.invoke(&[], &opts).await.unwrap().content, "rest");
    }

    #[tokio::test]
    async fn records_last_prompt() {
        let llm = MockLlm::with_content("ok");
        assert!(llm.last_prompt().is_none());
        llm.invoke(&[Message::user("hello")], &CompletionOptions::default())
            .await
            .unwrap();
        assert_eq!(llm.last_prompt(), Some(vec![Message::user("hello")]));
    }
}
