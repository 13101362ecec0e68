use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::Role;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is malformed")]
    Malformed,
    #[error("token could not be signed")]
    Signing,
}

impl Claims {
    pub fn new(user_id: Uuid, email: &str, role: Role, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Mint an HS256 token for the given identity, valid for `ttl`.
pub fn issue(
    user_id: Uuid,
    email: &str,
    role: Role,
    secret: &str,
    ttl: Duration,
) -> Result<String, TokenError> {
    encode_token(&Claims::new(user_id, email, role, ttl), secret)
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("JWT encode failed: {e}");
        TokenError::Signing
    })
}

/// Verify signature and expiry. Expiry is checked with zero leeway.
pub fn validate(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-jwt-secret-that-is-long-enough";

    #[test]
    fn issued_token_round_trips_identity() {
        let user_id = Uuid::now_v7();
        let token = issue(user_id, "dev@test.com", Role::Company, SECRET, Duration::hours(24)).unwrap();

        let claims = validate(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "dev@test.com");
        assert_eq!(claims.role, Role::Company);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn wrong_secret_is_invalid_signature() {
        let token = issue(Uuid::now_v7(), "a@b.com", Role::Admin, SECRET, Duration::hours(1)).unwrap();
        assert_eq!(
            validate(&token, "some-other-secret"),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn elapsed_ttl_is_expired() {
        let mut claims = Claims::new(Uuid::now_v7(), "a@b.com", Role::Developer, Duration::hours(1));
        claims.iat -= 7200;
        claims.exp = claims.iat + 3600;
        let token = encode_token(&claims, SECRET).unwrap();

        assert_eq!(validate(&token, SECRET), Err(TokenError::Expired));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(validate("not.a.jwt", SECRET), Err(TokenError::Malformed));
        assert_eq!(validate("", SECRET), Err(TokenError::Malformed));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let token = issue(Uuid::now_v7(), "a@b.com", Role::Developer, SECRET, Duration::hours(1)).unwrap();
        let other = issue(Uuid::now_v7(), "a@b.com", Role::Admin, SECRET, Duration::hours(1)).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        parts[1] = other_parts[1];
        let forged = parts.join(".");

        assert_eq!(validate(&forged, SECRET), Err(TokenError::InvalidSignature));
    }
}
