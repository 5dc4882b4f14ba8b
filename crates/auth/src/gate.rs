//! Auth gate middleware
//!
//! Runs before every handler mounted behind it. A request either leaves
//! the gate carrying a [`RequestIdentity`] in its extensions (anonymous or
//! authenticated) or is rejected with an [`AuthError`] response and never
//! reaches the handler.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::context::RequestIdentity;
use crate::error::AuthError;
use crate::jwt::{extract_bearer_token, verify_scoped_token};
use crate::store::IdentityStore;

/// Shared gate state, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AuthGate {
    config: Arc<AuthConfig>,
    store: Arc<dyn IdentityStore>,
}

impl AuthGate {
    pub fn new(config: Arc<AuthConfig>, store: Arc<dyn IdentityStore>) -> Self {
        Self { config, store }
    }

    /// Decide the identity for a request from its headers.
    ///
    /// A missing or blank `Authorization` header is anonymous. Anything
    /// else must be a valid token naming an existing user.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<RequestIdentity, AuthError> {
        let root = RequestIdentity::anonymous();

        let Some(header) = headers.get(AUTHORIZATION) else {
            return Ok(root);
        };

        let Some(token) = extract_bearer_token(header)? else {
            return Ok(root);
        };

        let secret = self.config.signing_secret().inspect_err(|_| {
            tracing::error!("Bearer token received but no signing secret is configured");
        })?;

        let claims = verify_scoped_token(token, secret, &self.config.scope())?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::UnresolvableSubject)?;

        let user = match self.store.find_user(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(AuthError::UserNotFound),
            Err(e) => {
                tracing::error!(error = %e, user_id = %user_id, "Identity lookup failed");
                return Err(AuthError::UserNotFound);
            }
        };

        tracing::debug!(user_id = %user.id, "Request authenticated");
        Ok(root.attach(user))
    }
}

impl std::fmt::Debug for AuthGate {
    #[mutants::skip] // Formatting only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Axum middleware applying [`AuthGate::authenticate`].
///
/// ```ignore
/// let app = router.layer(axum::middleware::from_fn_with_state(gate, auth_gate));
/// ```
pub async fn auth_gate(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    match gate.authenticate(req.headers()).await {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(
                reason = %e,
                method = %req.method(),
                path = %req.uri().path(),
                "Request rejected by auth gate"
            );
            Err(e)
        }
    }
}
