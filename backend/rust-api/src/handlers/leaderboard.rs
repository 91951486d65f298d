use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{api_error, ApiError};
use crate::models::leaderboard::{LeaderboardEntry, LeaderboardQuery, LeaderboardResponse};
use crate::services::AppState;

fn unavailable(err: anyhow::Error) -> ApiError {
    tracing::error!("Leaderboard read failed: {:#}", err);
    api_error(
        StatusCode::SERVICE_UNAVAILABLE,
        "storage_unavailable",
        "leaderboard unavailable",
    )
}

/// GET /api/v1/leaderboard?limit=n
pub async fn top_scores(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let entries = state
        .leaderboard
        .top_scores(query.effective_limit())
        .await
        .map_err(unavailable)?;
    Ok(Json(LeaderboardResponse { entries }))
}

/// GET /api/v1/leaderboard/{user_id}
pub async fn player_entry(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<LeaderboardEntry>, ApiError> {
    match state.leaderboard.entry(&user_id).await.map_err(unavailable)? {
        Some(entry) => Ok(Json(entry)),
        None => Err(api_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("no score recorded for {}", user_id),
        )),
    }
}
