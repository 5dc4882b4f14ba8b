//! Authentication configuration

use chrono::Duration;

use crate::error::AuthError;
use crate::jwt::TokenScope;

/// Authentication configuration, loaded once at process start.
#[derive(Clone)]
pub struct AuthConfig {
    /// Signing secret; `None` makes every bearer request a server fault.
    pub jwt_secret: Option<String>,
    pub token_ttl: Duration,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl AuthConfig {
    pub fn new(jwt_secret: Option<String>, token_ttl: Duration) -> Self {
        Self {
            jwt_secret,
            token_ttl,
            issuer: None,
            audience: None,
        }
    }

    /// Signing secret bytes, or `MissingSigningSecret` when unconfigured.
    pub fn signing_secret(&self) -> Result<&[u8], AuthError> {
        self.jwt_secret
            .as_deref()
            .map(str::as_bytes)
            .ok_or(AuthError::MissingSigningSecret)
    }

    pub(crate) fn scope(&self) -> TokenScope {
        TokenScope {
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
        }
    }

    /// Issue a token for `user_id` using the configured secret, TTL and scope.
    pub fn issue_token(&self, user_id: uuid::Uuid) -> Result<String, AuthError> {
        let secret = self.signing_secret()?;
        crate::jwt::issue_scoped_token(&user_id.to_string(), secret, self.token_ttl, &self.scope())
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %user_id, "Failed to issue token");
                AuthError::TokenIssue
            })
    }
}

impl std::fmt::Debug for AuthConfig {
    #[mutants::skip] // Formatting only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl", &self.token_ttl)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}
