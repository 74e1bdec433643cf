//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{api, commands, health, install, options};
use crate::state::AppState;

/// Maximum concurrent requests for Slack endpoints.
const SLACK_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Maximum concurrent requests for JSON API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /` - Landing page
/// - `GET /health` - Health check
/// - `GET /slack/install` - Redirect to Slack OAuth
/// - `GET /slack/oauth/callback` - OAuth acknowledgement
///
/// ## Slack (request signing)
/// - `POST /slack/commands` - Slash commands
/// - `POST /slack/options-domain` - Domain autocomplete
/// - `POST /slack/options-badge` - Badge autocomplete
///
/// ## API
/// - `GET /v1/leaderboard` - Leaderboard as JSON
/// - `GET /v1/questions` - Questions as JSON
/// - `GET /v1/questions/:id` - One question with its answers
/// - `POST /v1/admin/reset-period` - Reset the current period (admin key)
pub fn create_router(state: AppState) -> Router {
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let slack_routes = Router::new()
        .route("/commands", post(commands::slash_command))
        .route("/options-domain", post(options::domain_options))
        .route("/options-badge", post(options::badge_options))
        .route("/install", get(install::install))
        .route("/oauth/callback", get(install::oauth_callback))
        .layer(ConcurrencyLimitLayer::new(SLACK_MAX_CONCURRENT_REQUESTS));

    let api_routes = Router::new()
        .route("/leaderboard", get(api::leaderboard))
        .route("/questions", get(api::list_questions))
        .route("/questions/:id", get(api::get_question))
        .route("/admin/reset-period", post(api::reset_period))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        .route("/", get(install::landing))
        .route("/health", get(health::health))
        .nest("/slack", slack_routes)
        .nest("/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
