//! Slack integration.
//!
//! - `types`: Block Kit and slash-command wire types
//! - `render`: turns command outcomes into messages
//! - `webhook`: outbound announcements via an incoming webhook

pub mod render;
pub mod types;
pub mod webhook;

pub use render::{render_error, render_outcome};
pub use types::*;
pub use webhook::{NoopNotifier, Notifier, NotifyError, SlackWebhookNotifier};
