//! Identity claim carried inside bearer tokens

use serde::{Deserialize, Serialize};

/// Signed identity claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

impl IdentityClaims {
    /// A claim is valid only strictly before its expiry.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}
