use honeypot::MockLlm;
use std::sync::Arc;
use std::time::Duration;

use super::common;

#[tokio::test]
async fn e2e_health_reports_model_and_timeout() {
    let server = common::spawn_server(
        Arc::new(MockLlm::with_content(common::SCAM_VERDICT)),
        Some(Duration::from_secs(60)),
    )
    .await;

    let resp = reqwest::get(server.url(serve::HEALTH_PATH)).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "mock");
    assert_eq!(body["turn_timeout_secs"], 60);

    server.stop().await;
}

#[tokio::test]
async fn e2e_health_with_timeout_disabled() {
    let server = common::spawn_server(Arc::new(MockLlm::with_content("{}")), None).await;

    let body: serde_json::Value = reqwest::get(server.url(serve::HEALTH_PATH))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["turn_timeout_secs"].is_null());

    server.stop().await;
}

#[tokio::test]
async fn e2e_unknown_route_is_404() {
    let server = common::spawn_server(Arc::new(MockLlm::with_content("{}")), None).await;

    let resp = reqwest::get(server.url("/nope")).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

    server.stop().await;
}
