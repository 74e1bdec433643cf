//! Slash-command handler.
//!
//! Slack expects a 200 for every command it delivers, so command failures are
//! rendered as ephemeral messages rather than HTTP errors. Only requests that
//! fail signature verification or cannot be decoded get an error status.
//!
//! With a webhook configured, public results are announced through it and the
//! caller gets a private acknowledgement. Without one they are returned as an
//! in-channel reply.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use badgeup_core::UserId;

use crate::auth::verify_slack_request;
use crate::dispatch::{execute, Command};
use crate::error::ApiError;
use crate::slack::{render_error, render_outcome, SlackResponse, SlashCommandForm};
use crate::state::AppState;

/// Handle a slash command.
pub async fn slash_command(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<SlackResponse>, ApiError> {
    verify_slack_request(&state, &headers, &body)?;

    let form: SlashCommandForm =
        serde_urlencoded::from_str(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let actor = UserId::new(form.user_id.as_str())
        .map_err(|e| ApiError::BadRequest(format!("user_id: {e}")))?;

    tracing::debug!(
        command = %form.command,
        user_id = %actor,
        user_name = ?form.user_name,
        "Slash command received"
    );

    let result = match Command::parse(&form.command, &form.text) {
        Ok(command) => {
            let mut community = state.community.lock().await;
            execute(&mut community, &actor, command)
        }
        Err(e) => Err(e),
    };

    let response = match result {
        Ok(outcome) => render_outcome(&outcome),
        Err(e) => {
            tracing::info!(
                command = %form.command,
                user_id = %actor,
                error = %e,
                "Slash command rejected"
            );
            render_error(&e)
        }
    };

    // public results go out once: through the webhook when one is
    // configured, otherwise as the in-channel reply
    if response.is_public() && state.notifier.is_enabled() {
        state.announce(response.text, response.blocks);
        return Ok(Json(SlackResponse::acknowledgement()));
    }

    Ok(Json(response))
}
