//! Autocomplete endpoints for domain and badge pickers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::auth::verify_slack_request;
use crate::error::ApiError;
use crate::slack::{OptionsForm, OptionsResponse};
use crate::state::AppState;

fn parse_form(state: &AppState, headers: &HeaderMap, body: &str) -> Result<OptionsForm, ApiError> {
    verify_slack_request(state, headers, body)?;
    serde_urlencoded::from_str(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Domains matching what the user typed.
pub async fn domain_options(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<OptionsResponse>, ApiError> {
    let form = parse_form(&state, &headers, &body)?;
    let names = state.community.lock().await.suggest_domains(&form.value);
    Ok(Json(OptionsResponse::from_names(names)))
}

/// Badges matching what the user typed.
pub async fn badge_options(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<OptionsResponse>, ApiError> {
    let form = parse_form(&state, &headers, &body)?;
    let names = state.community.lock().await.suggest_badges(&form.value);
    Ok(Json(OptionsResponse::from_names(names)))
}
