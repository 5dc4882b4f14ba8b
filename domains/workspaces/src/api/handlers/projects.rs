//! Project resolvers: `projects`, `createProject`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklane_auth::AuthIdentity;
use tasklane_common::{validate_input, Result};
use uuid::Uuid;
use validator::Validate;

use super::{require_admin, require_membership};
use crate::api::middleware::WorkspacesState;
use crate::domain::entities::Project;
use crate::domain::validation::{normalize_name, validate_not_blank};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsInput {
    pub workspace_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectInput {
    pub workspace_id: Uuid,

    #[validate(
        length(min = 1, max = 100),
        custom(function = "validate_not_blank", message = "Name must not be blank")
    )]
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: Uuid,
    pub name: String,
    pub workspace_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            workspace_id: project.workspace_id,
            created_at: project.created_at,
        }
    }
}

/// Projects in a workspace the caller belongs to
pub async fn list_projects(
    state: &WorkspacesState,
    user: &AuthIdentity,
    input: ProjectsInput,
) -> Result<Vec<ProjectResponse>> {
    require_membership(state, input.workspace_id, user.id).await?;

    let projects = state
        .repos
        .projects
        .list_by_workspace(input.workspace_id)
        .await?;

    Ok(projects.into_iter().map(ProjectResponse::from).collect())
}

/// Create a project; OWNER or ADMIN only.
pub async fn create_project(
    state: &WorkspacesState,
    user: &AuthIdentity,
    input: CreateProjectInput,
) -> Result<ProjectResponse> {
    validate_input(&input)?;

    require_admin(state, input.workspace_id, user.id, "create projects").await?;

    let project = Project::new(normalize_name(&input.name), input.workspace_id);
    let project = state.repos.projects.create(&project).await?;

    tracing::info!(
        project_id = %project.id,
        workspace_id = %project.workspace_id,
        created_by = %user.id,
        "Project created"
    );

    Ok(project.into())
}
