//! Axum route handlers for the AI search API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::CandidateRecord;
use crate::search::models::RankedCandidate;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub candidates: Vec<CandidateRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResponse {
    pub ranked_candidates: Vec<RankedCandidate>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/search/rank
///
/// Ranks the candidates supplied in the request body.
pub async fn handle_rank(
    State(state): State<AppState>,
    payload: Result<Json<RankRequest>, JsonRejection>,
) -> Result<Json<RankResponse>, AppError> {
    let Json(request) = payload?;
    let ranked_candidates = state
        .ranker
        .rank(&request.query, &request.candidates)
        .await?;

    Ok(Json(RankResponse { ranked_candidates }))
}

/// POST /api/v1/search
///
/// Loads the user's candidates from the store and ranks them.
/// A store failure is an error; a scoring failure is not.
pub async fn handle_search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<RankResponse>, AppError> {
    let Json(request) = payload?;
    if request.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    tracing::info!(user_id = %request.user_id, "AI search request received");

    let candidates = state.store.candidates_for_user(request.user_id).await?;
    let ranked_candidates = state.ranker.rank(&request.query, &candidates).await?;

    Ok(Json(RankResponse { ranked_candidates }))
}
