use std::sync::Arc;
use thiserror::Error;

use crate::metrics::SUBMISSIONS_TOTAL;
use crate::models::score::{SubmitScoreRequest, SubmitScoreResponse};
use crate::services::leaderboard::LeaderboardStore;
use crate::services::replay_service::{self, ReplayError, ScoringPolicy};
use crate::services::session_service::{SessionError, SessionIssuer};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error("leaderboard unavailable: {0}")]
    Storage(#[from] anyhow::Error),
}

impl SubmissionError {
    pub fn reason(&self) -> &'static str {
        match self {
            SubmissionError::Session(e) => e.reason(),
            SubmissionError::Replay(e) => e.reason(),
            SubmissionError::Storage(_) => "storage_unavailable",
        }
    }
}

/// Token check, replay, then leaderboard write.
pub struct ScoreService {
    sessions: Arc<SessionIssuer>,
    leaderboard: Arc<dyn LeaderboardStore>,
    policy: ScoringPolicy,
}

impl ScoreService {
    pub fn new(
        sessions: Arc<SessionIssuer>,
        leaderboard: Arc<dyn LeaderboardStore>,
        policy: ScoringPolicy,
    ) -> Self {
        Self {
            sessions,
            leaderboard,
            policy,
        }
    }

    pub async fn submit(
        &self,
        req: &SubmitScoreRequest,
    ) -> Result<SubmitScoreResponse, SubmissionError> {
        let result = self.submit_inner(req).await;
        let label = match &result {
            Ok(_) => "accepted",
            Err(e) => e.reason(),
        };
        SUBMISSIONS_TOTAL.with_label_values(&[label]).inc();
        result
    }

    async fn submit_inner(
        &self,
        req: &SubmitScoreRequest,
    ) -> Result<SubmitScoreResponse, SubmissionError> {
        let session = self
            .sessions
            .verify(&req.token, &req.user_id, &req.seed, req.expires_at)?;

        if req.family.is_some_and(|f| f != session.family) {
            return Err(SessionError::Invalid.into());
        }

        let verified = replay_service::verify(
            session.family,
            &session.seed,
            &req.played_questions,
            req.score,
            &self.policy,
        )
        .inspect_err(|e| {
            tracing::warn!(
                user_id = %req.user_id,
                seed = %req.seed,
                reason = e.reason(),
                "Rejected score submission: {}",
                e
            );
        })?;

        let improved = self
            .leaderboard
            .add_score(&session.user_id, verified.score)
            .await?;
        let rank = self.leaderboard.rank(&session.user_id).await?;

        tracing::info!(
            user_id = %session.user_id,
            family = %session.family,
            score = verified.score,
            ceiling = verified.ceiling,
            questions = verified.questions,
            improved,
            "Score accepted"
        );

        Ok(SubmitScoreResponse {
            accepted: true,
            score: verified.score,
            ceiling: verified.ceiling,
            improved,
            rank,
        })
    }
}
