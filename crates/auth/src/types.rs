//! Auth read-model types
//!
//! Lightweight view of the `users` row owned by the workspaces domain.
//! Carries only the fields needed to authenticate a request.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identity of an authenticated user.
///
/// Never serialized: the password hash must not leave the server, and
/// handlers build their own response types from this.
#[derive(Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for AuthIdentity {
    #[mutants::skip] // Formatting only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthIdentity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}
