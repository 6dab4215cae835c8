//! Integration tests for the probe endpoints.

mod common;

use axum::http::StatusCode;

use common::harness::TestHarness;

#[tokio::test]
async fn test_health() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "sqlite");
}

#[tokio::test]
async fn test_liveness() {
    let harness = TestHarness::new().await;
    harness.server.get("/_liveness").await.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_checks_storage() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/_readiness").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["storage"], "ok");
}
