//! BadgeUp Service - Slack recognition and expertise routing
//!
//! This is the main entry point for the BadgeUp service.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use badgeup_service::{create_router, spawn_period_reset, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,badgeup=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting BadgeUp Service");

    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        webhook_configured = %config.slack_webhook_url.is_some(),
        signing_configured = %config.slack_signing_secret.is_some(),
        admin_configured = %config.admin_api_key.is_some(),
        badge_threshold = config.community.badge_threshold,
        "Service configuration loaded"
    );

    let state = AppState::new(config.clone());

    let _reset_task = spawn_period_reset(
        Arc::clone(&state.community),
        Duration::from_secs(config.period_reset_interval_seconds),
    );

    let app = create_router(state);
    tracing::info!("Router configured with all endpoints");

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
