use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::generator::FamilyKind;

/// A game session as bound into its token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub seed: String,
    pub user_id: String,
    pub family: FamilyKind,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct IssueSessionRequest {
    #[validate(length(
        min = 1,
        max = 64,
        message = "user_id must be between 1 and 64 characters"
    ))]
    pub user_id: String,

    /// Question family the client will generate from (defaults to general).
    #[serde(default)]
    pub family: FamilyKind,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IssueSessionResponse {
    pub seed: String,
    pub token: String,
    pub family: FamilyKind,
    pub expires_at: DateTime<Utc>,
}

/// JWT claims of a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub seed: String,
    pub family: FamilyKind,
    pub iat: i64,
    pub exp: i64,
}
