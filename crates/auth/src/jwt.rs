//! Token codec and bearer extraction helpers
//!
//! Tokens are HS256 JWTs carrying [`IdentityClaims`]. Expiry is checked
//! here rather than by `jsonwebtoken`, so there is no leeway: a token is
//! valid only while `now < exp`.

use axum::http::HeaderValue;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;

use crate::claims::IdentityClaims;
use crate::error::AuthError;

/// Why a token failed to encode or verify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("token could not be encoded: {0}")]
    Encoding(String),
}

/// Optional issuer/audience binding applied on issue and enforced on verify.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenScope {
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

/// Issue a signed token for `subject`, valid for `ttl` from now.
pub fn issue_token(subject: &str, secret: &[u8], ttl: Duration) -> Result<String, TokenError> {
    issue_scoped_token(subject, secret, ttl, &TokenScope::default())
}

/// Issue a signed token carrying the issuer/audience from `scope`.
pub fn issue_scoped_token(
    subject: &str,
    secret: &[u8],
    ttl: Duration,
    scope: &TokenScope,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let expires_at = now
        .checked_add_signed(ttl)
        .ok_or_else(|| TokenError::Encoding(format!("token lifetime {ttl} is out of range")))?;

    let claims = IdentityClaims {
        sub: subject.to_string(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
        iss: scope.issuer.clone(),
        aud: scope.audience.clone(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verify a token's signature and expiry and return its claims.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<IdentityClaims, TokenError> {
    verify_scoped_token(token, secret, &TokenScope::default())
}

/// Verify a token, additionally requiring the issuer/audience in `scope`.
pub fn verify_scoped_token(
    token: &str,
    secret: &[u8],
    scope: &TokenScope,
) -> Result<IdentityClaims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_exp = false;

    let mut required = vec!["exp", "sub"];

    if let Some(aud) = &scope.audience {
        validation.set_audience(&[aud]);
        required.push("aud");
    } else {
        validation.validate_aud = false;
    }

    if let Some(iss) = &scope.issuer {
        validation.set_issuer(&[iss]);
        required.push("iss");
    }

    validation.set_required_spec_claims(required.as_slice());

    let token_data = decode::<IdentityClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|e| {
            tracing::debug!(error = %e, "Token decoding failed");
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;

    if token_data.claims.is_expired_at(Utc::now().timestamp()) {
        return Err(TokenError::Expired);
    }

    Ok(token_data.claims)
}

/// Extract the bearer token from an `Authorization` header value.
///
/// - blank value: `Ok(None)`, the request is anonymous
/// - `Bearer` with nothing after it: `EmptyBearerToken`
/// - `Bearer <token>`: `Ok(Some(token))`
/// - any other value is taken as the token itself
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<Option<&str>, AuthError> {
    let raw = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?
        .trim();

    if raw.is_empty() {
        return Ok(None);
    }

    let token = if raw == "Bearer" {
        ""
    } else {
        raw.strip_prefix("Bearer ").unwrap_or(raw).trim()
    };

    if token.is_empty() {
        return Err(AuthError::EmptyBearerToken);
    }

    Ok(Some(token))
}
