//! Outbound announcements.
//!
//! Announcements are fire-and-forget: the community state is the source of
//! truth, so a failed delivery is logged and never undoes a command.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::types::{Block, WebhookMessage};

/// Error type for outbound delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Slack answered with a non-success status.
    #[error("webhook rejected message: {status} - {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },
}

/// Delivers public messages to the workspace.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Post a message.
    async fn announce(&self, text: &str, blocks: &[Block]) -> Result<(), NotifyError>;

    /// Whether announcements actually reach the workspace.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Notifier used when no webhook is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn announce(&self, text: &str, _blocks: &[Block]) -> Result<(), NotifyError> {
        tracing::debug!(text = %text, "No webhook configured, announcement dropped");
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Posts messages to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct SlackWebhookNotifier {
    client: Client,
    webhook_url: String,
}

impl SlackWebhookNotifier {
    /// Request timeout for webhook calls.
    const TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a notifier for `webhook_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(webhook_url: impl Into<String>) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(Self::TIMEOUT).build()?;
        Ok(Self {
            client,
            webhook_url: webhook_url.into(),
        })
    }
}

#[async_trait]
impl Notifier for SlackWebhookNotifier {
    async fn announce(&self, text: &str, blocks: &[Block]) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&WebhookMessage { text, blocks })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(blocks = blocks.len(), "Announcement delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_blocks_to_webhook() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(body_partial_json(serde_json::json!({
                "text": "hello",
                "blocks": [{ "type": "section", "text": { "type": "mrkdwn", "text": "*hello*" } }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = SlackWebhookNotifier::new(format!("{}/hook", server.uri())).unwrap();
        notifier
            .announce("hello", &[Block::section("*hello*")])
            .await
            .unwrap();
    }

    #[test]
    fn only_real_webhooks_are_enabled() {
        assert!(!NoopNotifier.is_enabled());
        let notifier = SlackWebhookNotifier::new("http://localhost/hook").unwrap();
        assert!(notifier.is_enabled());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no_service"))
            .mount(&server)
            .await;

        let notifier = SlackWebhookNotifier::new(server.uri()).unwrap();
        let err = notifier.announce("x", &[]).await.unwrap_err();
        assert!(matches!(err, NotifyError::Rejected { status: 404, ref body } if body == "no_service"));
    }
}
