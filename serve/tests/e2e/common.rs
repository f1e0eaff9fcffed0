//! Shared helpers for e2e tests. Received bodies are logged with `[e2e] received: ...`.
//! Run tests with `--nocapture` to see them.

use honeypot::{MockLlm, TurnProcessor};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const TEST_API_KEY: &str = "test-key";

pub const SCAM_VERDICT: &str = r#"{
    "classification": "SCAM",
    "confidence_score": 0.92,
    "current_state": "ENGAGEMENT",
    "reply_text": "Wow really? How do I claim it?",
    "explanation": "Lottery prize with an upfront fee.",
    "extracted_intel": {
        "upi_ids": ["claim@okaxis"],
        "bank_account_numbers": [],
        "phishing_urls": [],
        "phone_numbers": [],
        "scam_category": "Lottery Fraud"
    }
}"#;

/// Running server plus the handle needed to stop it.
pub struct TestServer {
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<Result<(), Box<dyn std::error::Error + Send + Sync>>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
    }
}

/// Binds a random port and serves a processor backed by `llm`.
pub async fn spawn_server(llm: Arc<MockLlm>, timeout: Option<Duration>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let processor = Arc::new(TurnProcessor::new(llm).with_timeout(timeout));
    let state = serve::AppState::new(processor, TEST_API_KEY);
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(serve::run_serve_on_listener(listener, state, async move {
        let _ = rx.await;
    }));
    TestServer {
        base_url: format!("http://{}", addr),
        shutdown: Some(tx),
        handle,
    }
}

/// Posts `body` (raw) to the engage endpoint; returns status and parsed JSON body.
pub async fn post_engage(
    server: &TestServer,
    api_key: Option<&str>,
    body: &str,
) -> (reqwest::StatusCode, Value) {
    let mut req = reqwest::Client::new()
        .post(server.url(serve::ENGAGE_PATH))
        .header("content-type", "application/json")
        .body(body.to_string());
    if let Some(key) = api_key {
        req = req.header("X-API-KEY", key);
    }
    let resp = req.send().await.unwrap();
    let status = resp.status();
    let text = resp.text().await.unwrap();
    eprintln!("[e2e] received: {}", text);
    (status, serde_json::from_str(&text).unwrap())
}
