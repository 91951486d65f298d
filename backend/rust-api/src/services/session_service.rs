use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;

use crate::generator::FamilyKind;
use crate::models::session::{Session, SessionClaims};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session token is invalid")]
    Invalid,
    #[error("session has expired")]
    Expired,
    #[error("failed to sign session token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

impl SessionError {
    pub fn reason(&self) -> &'static str {
        match self {
            SessionError::Invalid => "session_invalid",
            SessionError::Expired => "session_expired",
            SessionError::Signing(_) => "session_signing_failed",
        }
    }
}

/// Issues session seeds and the HS256 tokens that bind them to a player.
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionIssuer {
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_seconds),
        }
    }

    /// Fresh 128-bit seed from the OS-seeded generator, hex encoded.
    pub fn fresh_seed() -> String {
        hex::encode(rand::random::<[u8; 16]>())
    }

    pub fn issue(&self, user_id: &str, family: FamilyKind) -> Result<(Session, String), SessionError> {
        self.issue_at(user_id, family, Utc::now())
    }

    pub fn issue_at(
        &self,
        user_id: &str,
        family: FamilyKind,
        now: DateTime<Utc>,
    ) -> Result<(Session, String), SessionError> {
        // Whole seconds so expires_at round-trips through the `exp` claim
        let issued_at = Utc
            .timestamp_opt(now.timestamp(), 0)
            .single()
            .ok_or(SessionError::Invalid)?;
        let session = Session {
            seed: Self::fresh_seed(),
            user_id: user_id.to_string(),
            family,
            issued_at,
            expires_at: issued_at + self.ttl,
        };

        let claims = SessionClaims {
            sub: session.user_id.clone(),
            seed: session.seed.clone(),
            family,
            iat: session.issued_at.timestamp(),
            exp: session.expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok((session, token))
    }

    /// Checks signature and expiry, then that the token was issued for this
    /// exact `(user_id, seed, expires_at)`.
    pub fn verify(
        &self,
        token: &str,
        user_id: &str,
        seed: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, SessionError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionError::Expired,
                _ => {
                    tracing::debug!("rejecting session token: {}", e);
                    SessionError::Invalid
                }
            })?;

        if claims.sub != user_id || claims.seed != seed || claims.exp != expires_at.timestamp() {
            return Err(SessionError::Invalid);
        }

        let issued_at = Utc
            .timestamp_opt(claims.iat, 0)
            .single()
            .ok_or(SessionError::Invalid)?;
        Ok(Session {
            seed: claims.seed,
            user_id: claims.sub,
            family: claims.family,
            issued_at,
            expires_at,
        })
    }
}
