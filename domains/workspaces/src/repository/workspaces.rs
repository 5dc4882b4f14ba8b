//! Workspace repository

use crate::domain::entities::Workspace;
use sqlx::PgPool;
use tasklane_common::Result;
use uuid::Uuid;

#[derive(Clone)]
pub struct WorkspaceRepository {
    pool: PgPool,
}

impl WorkspaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get workspace by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Workspace>> {
        let workspace = sqlx::query_as::<_, Workspace>(
            r#"
            SELECT id, name, owner_id, created_at
            FROM workspaces
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(workspace)
    }

    /// Workspaces the user is a member of, oldest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Workspace>> {
        let workspaces = sqlx::query_as::<_, Workspace>(
            r#"
            SELECT w.id, w.name, w.owner_id, w.created_at
            FROM workspaces w
            INNER JOIN memberships m ON m.workspace_id = w.id
            WHERE m.user_id = $1
            ORDER BY w.created_at ASC, w.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(workspaces)
    }
}
