//! Identity store gateway
//!
//! Resolves a user id to an [`AuthIdentity`]. The Postgres implementation
//! reads the `users` table owned by the workspaces domain using runtime
//! `sqlx::query_as` (no compile-time macros).

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::types::AuthIdentity;

/// Failure talking to the identity store
#[derive(Debug, Error)]
pub enum IdentityStoreError {
    #[error("identity store query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("identity store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup of authenticated users by id.
///
/// Implementations must be safe to call from many requests at once.
#[async_trait::async_trait]
pub trait IdentityStore: Send + Sync {
    /// `Ok(None)` when no user has this id.
    async fn find_user(&self, id: Uuid) -> Result<Option<AuthIdentity>, IdentityStoreError>;
}

/// Postgres-backed identity store
#[derive(Clone)]
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<AuthIdentity>, IdentityStoreError> {
        let user: Option<AuthIdentity> = sqlx::query_as(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

impl std::fmt::Debug for PgIdentityStore {
    #[mutants::skip] // Formatting only
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgIdentityStore").finish_non_exhaustive()
    }
}
