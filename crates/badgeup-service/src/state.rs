//! Application state.

use std::sync::Arc;

use tokio::sync::Mutex;

use badgeup_core::Community;

use crate::config::ServiceConfig;
use crate::slack::{Block, NoopNotifier, Notifier, SlackWebhookNotifier};

/// The community behind the one lock every core operation takes.
pub type SharedCommunity = Arc<Mutex<Community>>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// All reputation and Q&A state.
    pub community: SharedCommunity,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Outbound announcement channel.
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create a new application state, choosing the notifier from config.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        let notifier: Arc<dyn Notifier> = match config.slack_webhook_url.as_deref() {
            Some(url) => match SlackWebhookNotifier::new(url) {
                Ok(notifier) => {
                    tracing::info!("Slack webhook announcements enabled");
                    Arc::new(notifier)
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create Slack webhook client");
                    Arc::new(NoopNotifier)
                }
            },
            None => {
                tracing::warn!("Slack webhook not configured - announcements will not be posted");
                Arc::new(NoopNotifier)
            }
        };

        Self::with_notifier(config, notifier)
    }

    /// Create a state with an explicit notifier.
    #[must_use]
    pub fn with_notifier(config: ServiceConfig, notifier: Arc<dyn Notifier>) -> Self {
        if config.slack_signing_secret.is_none() {
            tracing::warn!(
                "Slack signing secret not configured - skipping request signature verification"
            );
        }

        let community = Community::new(config.community.clone());
        Self {
            community: Arc::new(Mutex::new(community)),
            config,
            notifier,
        }
    }

    /// Post a message in the background.
    ///
    /// Must be called after the community lock is released; delivery failures
    /// are only logged.
    pub fn announce(&self, text: String, blocks: Vec<Block>) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            if let Err(e) = notifier.announce(&text, &blocks).await {
                tracing::warn!(error = %e, "Failed to deliver announcement");
            }
        });
    }
}
