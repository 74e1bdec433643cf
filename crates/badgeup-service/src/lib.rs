//! BadgeUp Slack service.
//!
//! This crate is the command dispatcher in front of [`badgeup_core`]:
//!
//! - Slash commands (`/kudos`, `/badge`, `/domain`, `/question`, `/answer`,
//!   `/experts`, `/leaderboard`, `/question-query`)
//! - Domain and badge autocomplete
//! - JSON read views and an operator endpoint for period resets
//! - Slack app install flow
//!
//! Each command runs one core operation under a single lock; public results
//! are announced through the configured webhook after the lock is released.
//!
//! # Authentication
//!
//! 1. **Slack request signing** - for `/slack/commands` and options endpoints
//! 2. **Admin API key** - for `/v1/admin/*`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers need async for the router

pub mod auth;
pub mod config;
pub mod crypto;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod scheduler;
pub mod slack;
pub mod state;

pub use config::ServiceConfig;
pub use dispatch::{execute, Command, Outcome};
pub use error::ApiError;
pub use routes::create_router;
pub use scheduler::spawn_period_reset;
pub use slack::{NoopNotifier, Notifier, NotifyError, SlackWebhookNotifier};
pub use state::{AppState, SharedCommunity};
