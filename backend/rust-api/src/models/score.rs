use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::generator::{Constraint, FamilyKind};

/// `selected_answer` value recorded when the player skipped a question.
pub const PASS: i64 = -1;

/// One entry of the client's play log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedQuestion {
    pub question_id: String,
    pub selected_answer: i64,
    pub correct: bool,
    pub time_ms: u64,
    /// Constraint the client generated this entry under.
    #[serde(default)]
    pub constraint: Constraint,
}

impl PlayedQuestion {
    pub fn is_pass(&self) -> bool {
        self.selected_answer == PASS
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitScoreRequest {
    #[validate(length(min = 1, max = 64, message = "user_id must be between 1 and 64 characters"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "seed must not be empty"))]
    pub seed: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub score: i64,
    /// Optional echo of the family; must match the token when present.
    #[serde(default)]
    pub family: Option<FamilyKind>,
    #[serde(default)]
    pub played_questions: Vec<PlayedQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitScoreResponse {
    pub accepted: bool,
    pub score: i64,
    pub ceiling: i64,
    /// Whether the leaderboard entry was raised.
    pub improved: bool,
    /// 1-based leaderboard position after the update.
    pub rank: Option<u64>,
}
