//! Common test utilities for BadgeUp integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum_test::{TestResponse, TestServer};

use badgeup_service::slack::Block;
use badgeup_service::{
    create_router, AppState, NoopNotifier, Notifier, NotifyError, ServiceConfig,
};

/// Admin key configured by [`TestHarness::new`].
pub const ADMIN_KEY: &str = "test-admin-key";

/// Notifier that keeps every announcement in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Fallback texts announced so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn announce(&self, text: &str, _blocks: &[Block]) -> Result<(), NotifyError> {
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Announcements posted by the service (empty without a webhook).
    pub notifier: Arc<RecordingNotifier>,
}

impl TestHarness {
    /// Harness with an admin key, no Slack signing and no webhook.
    pub fn new() -> Self {
        Self::with_config(admin_config())
    }

    /// Harness with an admin key and a recording webhook.
    pub fn with_webhook() -> Self {
        Self::build(admin_config(), true)
    }

    /// Harness with an explicit configuration and no webhook.
    pub fn with_config(config: ServiceConfig) -> Self {
        Self::build(config, false)
    }

    fn build(config: ServiceConfig, webhook: bool) -> Self {
        let notifier = Arc::new(RecordingNotifier::default());
        let state = if webhook {
            AppState::with_notifier(config, notifier.clone())
        } else {
            AppState::with_notifier(config, Arc::new(NoopNotifier))
        };
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, notifier }
    }

    /// Send a slash command as `user_id`.
    pub async fn command(&self, user_id: &str, command: &str, text: &str) -> TestResponse {
        self.server
            .post("/slack/commands")
            .form(&[
                ("command", command),
                ("text", text),
                ("user_id", user_id),
                ("user_name", "tester"),
            ])
            .await
    }

    /// Wait until at least `count` announcements were delivered.
    pub async fn announcements(&self, count: usize) -> Vec<String> {
        for _ in 0..100 {
            let messages = self.notifier.messages();
            if messages.len() >= count {
                return messages;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.notifier.messages()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Test configuration with an admin key.
pub fn admin_config() -> ServiceConfig {
    ServiceConfig {
        admin_api_key: Some(ADMIN_KEY.into()),
        ..test_config()
    }
}

/// Configuration with the timer disabled and defaults elsewhere.
pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        listen_addr: "127.0.0.1:0".into(),
        period_reset_interval_seconds: 0,
        ..ServiceConfig::default()
    }
}

/// Response type and fallback text of a slash-command reply.
pub fn reply(response: &TestResponse) -> (String, String) {
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    (
        body["response_type"].as_str().unwrap_or_default().to_string(),
        body["text"].as_str().unwrap_or_default().to_string(),
    )
}
