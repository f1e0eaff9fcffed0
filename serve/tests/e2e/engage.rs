use honeypot::MockLlm;
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;

use super::common::{self, post_engage, SCAM_VERDICT, TEST_API_KEY};

/// **Scenario**: missing or wrong key is rejected before any judgement call.
#[tokio::test]
async fn e2e_bad_api_key_returns_401_without_processing() {
    let llm = Arc::new(MockLlm::with_content(SCAM_VERDICT));
    let server = common::spawn_server(llm.clone(), None).await;

    let (status, body) = post_engage(&server, Some("wrong"), r#"{"message":"hi"}"#).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Unauthorized: Invalid API Key"}));

    let (status, _) = post_engage(&server, None, r#"{"message":"hi"}"#).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Auth is checked before the body, so even garbage gets 401.
    let (status, _) = post_engage(&server, None, "not json").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(llm.call_count(), 0);
    server.stop().await;
}

/// **Scenario**: valid key but no message gives 400 and no external call.
#[tokio::test]
async fn e2e_missing_message_returns_400() {
    let llm = Arc::new(MockLlm::with_content(SCAM_VERDICT));
    let server = common::spawn_server(llm.clone(), None).await;

    let (status, body) = post_engage(&server, Some(TEST_API_KEY), r#"{"history":[]}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing 'message' in request body"}));

    let (status, _) = post_engage(&server, Some(TEST_API_KEY), r#"{"message":""}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(llm.call_count(), 0);
    server.stop().await;
}

#[tokio::test]
async fn e2e_invalid_json_returns_400() {
    let llm = Arc::new(MockLlm::with_content(SCAM_VERDICT));
    let server = common::spawn_server(llm.clone(), None).await;

    let (status, body) = post_engage(&server, Some(TEST_API_KEY), "{message: nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid JSON in request body"}));
    assert_eq!(llm.call_count(), 0);

    server.stop().await;
}

#[tokio::test]
async fn e2e_success_returns_verdict_json() {
    let llm = Arc::new(MockLlm::with_content(SCAM_VERDICT));
    let server = common::spawn_server(llm.clone(), None).await;

    let (status, body) = post_engage(
        &server,
        Some(TEST_API_KEY),
        r#"{"message":"You won a lottery! Pay 500 to claim."}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"], "SCAM");
    assert_eq!(body["confidence_score"], 0.92);
    assert_eq!(body["current_state"], "ENGAGEMENT");
    assert_eq!(body["reply_text"], "Wow really? How do I claim it?");
    assert_eq!(body["extracted_intel"]["upi_ids"], json!(["claim@okaxis"]));
    assert_eq!(body["extracted_intel"]["phone_numbers"], json!([]));
    assert_eq!(body["extracted_intel"]["scam_category"], "Lottery Fraud");
    assert_eq!(llm.call_count(), 1);

    server.stop().await;
}

#[tokio::test]
async fn e2e_history_reaches_the_transcript() {
    let llm = Arc::new(MockLlm::with_content(SCAM_VERDICT));
    let server = common::spawn_server(llm.clone(), None).await;

    let body = json!({
        "message": "Send the fee to claim@okaxis",
        "history": [
            {"sender": "Scammer", "text": "Congratulations, you won 25 lakh!"},
            {"sender": "Agent", "text": "Omg really?"},
            {"unexpected": true}
        ]
    });
    let (status, _) = post_engage(&server, Some(TEST_API_KEY), &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let prompt = llm.last_prompt().expect("prompt recorded");
    let transcript = prompt
        .iter()
        .map(|m| m.content().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    assert!(transcript.contains("Scammer: Congratulations, you won 25 lakh!"));
    assert!(transcript.contains("Agent: Omg really?"));
    assert!(transcript.contains("Send the fee to claim@okaxis"));

    server.stop().await;
}

#[tokio::test]
async fn e2e_upstream_failure_returns_500_with_details() {
    let llm = Arc::new(MockLlm::failing("quota exceeded"));
    let server = common::spawn_server(llm.clone(), None).await;

    let (status, body) = post_engage(&server, Some(TEST_API_KEY), r#"{"message":"hello"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    assert!(
        body["details"].as_str().unwrap().contains("quota exceeded"),
        "details: {}",
        body["details"]
    );

    server.stop().await;
}

#[tokio::test]
async fn e2e_malformed_output_returns_500() {
    let llm = Arc::new(MockLlm::with_content(r#"{"classification":"SCAM"}"#));
    let server = common::spawn_server(llm.clone(), None).await;

    let (status, body) = post_engage(&server, Some(TEST_API_KEY), r#"{"message":"hello"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    assert!(body["details"].is_string());

    server.stop().await;
}
