//! Request authentication.
//!
//! - `AdminAuth` - operator endpoints via API key
//! - `verify_slack_request` - Slack request signing for command and options endpoints

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::crypto::{constant_time_eq, verify_slack_signature};
use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the Slack request timestamp.
pub const SLACK_TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

/// Header carrying the Slack request signature.
pub const SLACK_SIGNATURE_HEADER: &str = "x-slack-signature";

/// Operator authentication via the `x-api-key` header.
#[derive(Debug, Clone)]
pub struct AdminAuth;

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let expected_key = state
            .config
            .admin_api_key
            .as_ref()
            .ok_or(ApiError::Unauthorized)?;

        if !constant_time_eq(api_key, expected_key) {
            return Err(ApiError::Unauthorized);
        }

        Ok(AdminAuth)
    }
}

/// Check a Slack request signature when a signing secret is configured.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` for missing or invalid signatures.
pub fn verify_slack_request(
    state: &AppState,
    headers: &HeaderMap,
    body: &str,
) -> Result<(), ApiError> {
    let Some(secret) = &state.config.slack_signing_secret else {
        return Ok(());
    };

    let timestamp = header_str(headers, SLACK_TIMESTAMP_HEADER).ok_or(ApiError::Unauthorized)?;
    let signature = header_str(headers, SLACK_SIGNATURE_HEADER).ok_or(ApiError::Unauthorized)?;

    verify_slack_signature(
        secret,
        timestamp,
        body,
        signature,
        chrono::Utc::now().timestamp(),
    )
    .map_err(|e| {
        tracing::warn!(error = %e, "Rejected Slack request");
        ApiError::Unauthorized
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
