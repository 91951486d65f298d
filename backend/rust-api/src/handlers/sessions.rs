use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

use super::{api_error, ApiError};
use crate::extractors::AppJson;
use crate::metrics::SESSIONS_ISSUED_TOTAL;
use crate::models::session::{IssueSessionRequest, IssueSessionResponse};
use crate::services::AppState;

/// POST /api/v1/sessions - Issue a seed and session token
pub async fn issue_session(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<IssueSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = req.validate() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "validation_failed",
            format!("Validation error: {}", e),
        ));
    }

    let (session, token) = state.sessions.issue(&req.user_id, req.family).map_err(|e| {
        tracing::error!("Failed to issue session: {}", e);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.reason(), e.to_string())
    })?;

    SESSIONS_ISSUED_TOTAL.inc();
    tracing::info!(
        user_id = %session.user_id,
        family = %session.family,
        expires_at = %session.expires_at,
        "Issued session"
    );

    Ok((
        StatusCode::CREATED,
        Json(IssueSessionResponse {
            seed: session.seed,
            token,
            family: session.family,
            expires_at: session.expires_at,
        }),
    ))
}
