//! Project repository

use crate::domain::entities::Project;
use sqlx::PgPool;
use tasklane_common::{RepositoryError, Result};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, workspace_id, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// Projects in a workspace, oldest first
    pub async fn list_by_workspace(&self, workspace_id: Uuid) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, workspace_id, created_at
            FROM projects
            WHERE workspace_id = $1
            ORDER BY created_at ASC, name ASC
            "#,
        )
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    pub async fn create(&self, project: &Project) -> std::result::Result<Project, RepositoryError> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (id, name, workspace_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, workspace_id, created_at
            "#,
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(project.workspace_id)
        .bind(project.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::classify)
    }
}
