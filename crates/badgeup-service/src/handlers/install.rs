//! Landing page and Slack app installation.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Scopes requested at install time.
const OAUTH_SCOPES: &str = "commands,chat:write,users:read";

/// Landing page with an install link.
pub async fn landing() -> Html<&'static str> {
    Html(r#"<h1>BadgeUp</h1><a href="/slack/install">Add to Slack</a>"#)
}

/// Redirect to Slack's OAuth authorize page.
pub async fn install(State(state): State<Arc<AppState>>) -> Result<Redirect, ApiError> {
    let client_id = state
        .config
        .slack_client_id
        .as_deref()
        .ok_or_else(|| ApiError::Unavailable("Slack client id not configured".into()))?;
    let redirect_uri = state
        .config
        .redirect_uri
        .as_deref()
        .ok_or_else(|| ApiError::Unavailable("OAuth redirect URI not configured".into()))?;

    let url = format!(
        "https://slack.com/oauth/v2/authorize?client_id={client_id}&scope={OAUTH_SCOPES}&redirect_uri={redirect_uri}"
    );
    Ok(Redirect::temporary(&url))
}

/// OAuth callback query parameters.
#[derive(Debug, Deserialize)]
pub struct OAuthCallback {
    /// Authorization code (exchanged by the deployment, not by this service).
    pub code: Option<String>,
    /// Error reported by Slack, if the user cancelled.
    pub error: Option<String>,
}

/// OAuth callback acknowledgement.
pub async fn oauth_callback(Query(query): Query<OAuthCallback>) -> Result<Html<String>, ApiError> {
    if let Some(error) = query.error {
        tracing::warn!(error = %error, "Slack install was not completed");
        return Err(ApiError::BadRequest(format!("installation failed: {error}")));
    }
    tracing::info!(has_code = query.code.is_some(), "Slack install callback received");
    Ok(Html("<p>BadgeUp is installed. Head back to Slack and try /kudos.</p>".to_string()))
}
