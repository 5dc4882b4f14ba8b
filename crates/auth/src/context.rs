//! Request-scoped identity carrier

use std::sync::Arc;

use crate::types::AuthIdentity;

/// Identity attached to a single request.
///
/// Created by the auth gate before handlers run and stored in the
/// request's extensions. A value never changes once built: `attach`
/// returns a new carrier and leaves the receiver as it was.
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity {
    user: Option<Arc<AuthIdentity>>,
}

impl RequestIdentity {
    /// Carrier for a request with no usable identity
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Return a new carrier holding `user`.
    pub fn attach(&self, user: AuthIdentity) -> Self {
        Self {
            user: Some(Arc::new(user)),
        }
    }

    /// The authenticated user, or `None` for an anonymous request
    pub fn user(&self) -> Option<&AuthIdentity> {
        self.user.as_deref()
    }

    /// Shared handle to the authenticated user
    pub fn shared_user(&self) -> Option<Arc<AuthIdentity>> {
        self.user.clone()
    }
}
