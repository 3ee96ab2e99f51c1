//! Tests for the operational endpoints: health, config, metrics.

mod common;

use axum::http::StatusCode;

use common::TestFixture;

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::with_unresolvable_transcoder();

    let response = fixture.get("/api/v1/health").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");
}

#[tokio::test]
async fn test_config_endpoint_reports_sanitized_config() {
    let fixture = TestFixture::with_unresolvable_transcoder();

    let response = fixture.get("/api/v1/config").await;

    assert_status!(response, StatusCode::OK);

    // The secret itself must never leave the process.
    assert!(!response.body.contains("fixture-secret-token"));

    let json = response.json();
    assert_eq!(json["credentials"]["provider"], "static_token");
    assert_eq!(json["credentials"]["token_configured"], true);
    assert_eq!(json["server"]["port"], 8080);
    assert_eq!(json["transcoder"]["binary_name"], "missing-test-transcoder");
}

#[tokio::test]
async fn test_metrics_endpoint_serves_prometheus_text() {
    let fixture = TestFixture::with_unresolvable_transcoder();

    // Any request through the router populates the HTTP metrics.
    fixture.get("/api/v1/health").await;

    let response = fixture.get("/metrics").await;

    assert_status!(response, StatusCode::OK);
    assert!(response.body.contains("# HELP"));
    assert!(response.body.contains("ferryman_http_requests_total"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let fixture = TestFixture::with_unresolvable_transcoder();

    let response = fixture.get("/api/v1/nope").await;

    assert_status!(response, StatusCode::NOT_FOUND);
}
