//! Membership repository

use crate::domain::entities::{Membership, MembershipRole};
use sqlx::PgPool;
use tasklane_common::{RepositoryError, Result};
use uuid::Uuid;

/// Membership with joined user details for list responses
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MembershipWithUser {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub user_id: Uuid,
    pub role: MembershipRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user_name: String,
    pub user_email: String,
    pub user_created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get membership by workspace and user
    pub async fn get_by_workspace_and_user(
        &self,
        workspace_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Membership>> {
        let row = sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, user_id, workspace_id, role, created_at
            FROM memberships
            WHERE workspace_id = $1 AND user_id = $2
            "#,
        )
        .bind(workspace_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// List all memberships for a workspace with user details
    pub async fn list_by_workspace(&self, workspace_id: Uuid) -> Result<Vec<MembershipWithUser>> {
        let memberships = sqlx::query_as::<_, MembershipWithUser>(
            r#"
            SELECT m.id, m.workspace_id, m.user_id, m.role, m.created_at,
                   u.name AS user_name, u.email AS user_email,
                   u.created_at AS user_created_at
            FROM memberships m
            INNER JOIN users u ON m.user_id = u.id
            WHERE m.workspace_id = $1
            ORDER BY
                CASE m.role
                    WHEN 'OWNER' THEN 0
                    WHEN 'ADMIN' THEN 1
                    WHEN 'MEMBER' THEN 2
                END ASC,
                u.name ASC
            "#,
        )
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(memberships)
    }

    /// Insert a membership.
    ///
    /// Returns `RepositoryError::AlreadyExists` when the user is already a
    /// member of the workspace.
    pub async fn create(
        &self,
        membership: &Membership,
    ) -> std::result::Result<Membership, RepositoryError> {
        sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO memberships (id, user_id, workspace_id, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, workspace_id, role, created_at
            "#,
        )
        .bind(membership.id)
        .bind(membership.user_id)
        .bind(membership.workspace_id)
        .bind(membership.role)
        .bind(membership.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::classify)
    }
}
