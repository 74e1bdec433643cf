//! JSON read views and operator endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use badgeup_core::{CommunityError, Question, QuestionId, Ranking, Standing};

use crate::auth::AdminAuth;
use crate::dispatch::QuestionView;
use crate::error::ApiError;
use crate::state::AppState;

/// Upper bound for `limit`.
const MAX_LEADERBOARD_LIMIT: usize = 100;

/// Leaderboard query parameters.
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// Number of rows (default: configured leaderboard size).
    pub limit: Option<usize>,
    /// Rank lifetime points in this domain instead of the current period.
    pub domain: Option<String>,
}

/// Leaderboard response.
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    /// What was ranked.
    pub ranking: Ranking,
    /// Rows, best first.
    pub standings: Vec<Standing>,
}

/// Current leaderboard.
pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let ranking = query
        .domain
        .filter(|d| !d.trim().is_empty())
        .map_or(Ranking::CurrentPeriod, |d| Ranking::Lifetime(d.trim().to_string()));
    let limit = query.limit.map(|l| l.min(MAX_LEADERBOARD_LIMIT));

    let standings = state.community.lock().await.leaderboard(limit, &ranking);
    Ok(Json(LeaderboardResponse { ranking, standings }))
}

/// Question list query parameters.
#[derive(Debug, Deserialize)]
pub struct QuestionsQuery {
    /// Optional domain filter (case-insensitive).
    pub domain: Option<String>,
}

/// Question list response.
#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    /// Matching questions in posting order.
    pub questions: Vec<QuestionView>,
}

/// List questions.
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QuestionsQuery>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let community = state.community.lock().await;
    let questions = community
        .list_questions(query.domain.as_deref())
        .into_iter()
        .map(QuestionView::from)
        .collect();
    Ok(Json(QuestionsResponse { questions }))
}

/// One question with all of its answers.
pub async fn get_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Question>, ApiError> {
    let question_id: QuestionId = id.parse().map_err(CommunityError::from)?;
    let question = state.community.lock().await.question(question_id)?.clone();
    Ok(Json(question))
}

/// Period reset response.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    /// Users whose non-zero period total was cleared.
    pub cleared: usize,
}

/// Reset the current period on demand.
pub async fn reset_period(
    State(state): State<Arc<AppState>>,
    _admin: AdminAuth,
) -> Result<Json<ResetResponse>, ApiError> {
    let cleared = state.community.lock().await.reset_period();
    tracing::info!(cleared, "Period reset requested by operator");
    Ok(Json(ResetResponse { cleared }))
}
