//! Health and install endpoint integration tests.

mod common;

use axum::http::StatusCode;
use badgeup_service::ServiceConfig;
use common::{test_config, TestHarness};

#[tokio::test]
async fn health_check_returns_json() {
    let harness = TestHarness::new();

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "badgeup");
}

#[tokio::test]
async fn landing_page_links_to_install() {
    let harness = TestHarness::new();

    let response = harness.server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("/slack/install"));
}

#[tokio::test]
async fn install_without_client_id_is_unavailable() {
    let harness = TestHarness::new();

    let response = harness.server.get("/slack/install").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "unavailable");
}

#[tokio::test]
async fn install_redirects_to_slack_authorize() {
    let harness = TestHarness::with_config(ServiceConfig {
        slack_client_id: Some("123.456".into()),
        redirect_uri: Some("https://badgeup.test/slack/oauth/callback".into()),
        ..test_config()
    });

    let response = harness.server.get("/slack/install").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    let location = response.header("location");
    let location = location.to_str().unwrap();
    assert!(location.starts_with("https://slack.com/oauth/v2/authorize?"));
    assert!(location.contains("client_id=123.456"));
}

#[tokio::test]
async fn oauth_callback_reports_cancelled_install() {
    let harness = TestHarness::new();

    harness
        .server
        .get("/slack/oauth/callback")
        .add_query_param("code", "abc")
        .await
        .assert_status_ok();

    harness
        .server
        .get("/slack/oauth/callback")
        .add_query_param("error", "access_denied")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
