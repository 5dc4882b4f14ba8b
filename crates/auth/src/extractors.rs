//! Axum extractors for the request identity
//!
//! These read the [`RequestIdentity`] the auth gate stored in the request
//! extensions. They need no state, so they work with any router state `S`.

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::context::RequestIdentity;
use crate::error::AuthError;
use crate::types::AuthIdentity;

impl<S> FromRequestParts<S> for RequestIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        // Routes mounted outside the gate see an anonymous identity
        Ok(parts
            .extensions
            .get::<RequestIdentity>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Authenticated user extractor; anonymous requests get 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Arc<AuthIdentity>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let user = MaybeUser::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        CurrentUser::try_from(user)
    }
}

impl TryFrom<MaybeUser> for CurrentUser {
    type Error = AuthError;

    fn try_from(MaybeUser(user): MaybeUser) -> std::result::Result<Self, Self::Error> {
        user.map(CurrentUser).ok_or(AuthError::Unauthenticated)
    }
}

/// Optional user extractor for endpoints open to anonymous callers.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Arc<AuthIdentity>>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let identity = RequestIdentity::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        Ok(MaybeUser(identity.shared_user()))
    }
}
