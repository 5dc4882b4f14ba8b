//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::jwt::TokenError;

/// Authentication error
///
/// Token-content failures (`InvalidToken`, `UnresolvableSubject`,
/// `UserNotFound`) render identically to the client; the variant is kept
/// for logs only.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("bearer token is empty")]
    EmptyBearerToken,

    #[error("authorization header is not valid ASCII")]
    InvalidAuthorizationFormat,

    #[error("signing secret is not configured")]
    MissingSigningSecret,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("token subject is not a user id")]
    UnresolvableSubject,

    #[error("token subject does not resolve to a user")]
    UserNotFound,

    #[error("authentication required")]
    Unauthenticated,

    #[error("failed to issue token")]
    TokenIssue,
}

impl AuthError {
    /// HTTP status, machine code and client-facing message
    pub fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            AuthError::EmptyBearerToken => (
                StatusCode::UNAUTHORIZED,
                "MISSING_BEARER_TOKEN",
                "Bearer token is required",
            ),
            AuthError::InvalidAuthorizationFormat => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTHORIZATION",
                "Invalid authorization header format",
            ),
            AuthError::MissingSigningSecret => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AUTH_NOT_CONFIGURED",
                "Authentication is not configured",
            ),
            AuthError::InvalidToken(_) | AuthError::UnresolvableSubject | AuthError::UserNotFound => {
                (StatusCode::UNAUTHORIZED, "INVALID_TOKEN", "Invalid token")
            }
            AuthError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Authentication required",
            ),
            AuthError::TokenIssue => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TOKEN_ISSUE_FAILED",
                "Failed to issue token",
            ),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for tasklane_common::Error {
    fn from(err: AuthError) -> Self {
        let (status, code, message) = err.parts();
        tasklane_common::Error::Upstream {
            status,
            code,
            message: message.to_string(),
        }
    }
}
