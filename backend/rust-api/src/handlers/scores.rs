use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

use super::{api_error, ApiError};
use crate::extractors::AppJson;
use crate::models::score::{SubmitScoreRequest, SubmitScoreResponse};
use crate::services::score_service::SubmissionError;
use crate::services::AppState;

/// POST /api/v1/scores - Replay a finished session and record its score
pub async fn submit_score(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<SubmitScoreRequest>,
) -> Result<Json<SubmitScoreResponse>, ApiError> {
    if let Err(e) = req.validate() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "validation_failed",
            format!("Validation error: {}", e),
        ));
    }

    tracing::info!(
        user_id = %req.user_id,
        questions = req.played_questions.len(),
        score = req.score,
        "Score submitted"
    );

    match state.scores.submit(&req).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            let status = match &e {
                SubmissionError::Session(_) => StatusCode::UNAUTHORIZED,
                SubmissionError::Replay(_) => StatusCode::UNPROCESSABLE_ENTITY,
                SubmissionError::Storage(err) => {
                    tracing::error!("Leaderboard write failed: {:#}", err);
                    StatusCode::SERVICE_UNAVAILABLE
                }
            };
            Err(api_error(status, e.reason(), e.to_string()))
        }
    }
}
