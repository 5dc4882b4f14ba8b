//! Task resolvers: `tasks`, `createTask`, `updateTaskStatus`, `assignTask`

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklane_auth::AuthIdentity;
use tasklane_common::{validate_input, Error, Result};
use uuid::Uuid;
use validator::Validate;

use super::accounts::UserResponse;
use super::{require_admin, require_assignable, require_membership};
use crate::api::middleware::WorkspacesState;
use crate::domain::entities::{Project, Task, TaskPriority, TaskStatus, User, Workspace};
use crate::domain::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TasksInput {
    pub project_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskInput {
    pub project_id: Uuid,

    #[validate(
        length(min = 1, max = 200),
        custom(function = "validate_not_blank", message = "Title must not be blank")
    )]
    pub title: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[serde(default)]
    pub priority: TaskPriority,

    pub assigned_to: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskStatusInput {
    pub task_id: Uuid,
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignTaskInput {
    pub task_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRef {
    pub id: Uuid,
    pub name: String,
    pub workspace: WorkspaceRef,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub project: ProjectRef,
    /// Assignee, if any
    pub assigned_to: Option<UserResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskResponse {
    fn build(task: Task, project: &Project, workspace: &Workspace, assignee: Option<User>) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            project: ProjectRef {
                id: project.id,
                name: project.name.clone(),
                workspace: WorkspaceRef {
                    id: workspace.id,
                    name: workspace.name.clone(),
                },
            },
            assigned_to: assignee.map(UserResponse::from),
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Resolve a project and its workspace, or 404.
async fn load_project(state: &WorkspacesState, project_id: Uuid) -> Result<(Project, Workspace)> {
    let project = state
        .repos
        .projects
        .get_by_id(project_id)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

    let workspace = state
        .repos
        .workspaces
        .get_by_id(project.workspace_id)
        .await?
        .ok_or_else(|| Error::NotFound("Workspace not found".to_string()))?;

    Ok((project, workspace))
}

async fn load_task(state: &WorkspacesState, task_id: Uuid) -> Result<Task> {
    state
        .repos
        .tasks
        .get_by_id(task_id)
        .await?
        .ok_or_else(|| Error::NotFound("Task not found".to_string()))
}

async fn load_assignee(state: &WorkspacesState, task: &Task) -> Result<Option<User>> {
    match task.assigned_to {
        Some(user_id) => state.repos.users.get_by_id(user_id).await,
        None => Ok(None),
    }
}

/// Tasks in a project; the caller must be a member of its workspace.
pub async fn list_tasks(
    state: &WorkspacesState,
    user: &AuthIdentity,
    input: TasksInput,
) -> Result<Vec<TaskResponse>> {
    let (project, workspace) = load_project(state, input.project_id).await?;
    require_membership(state, workspace.id, user.id).await?;

    let tasks = state.repos.tasks.list_by_project(project.id).await?;

    let mut assignee_ids: Vec<Uuid> = tasks.iter().filter_map(|t| t.assigned_to).collect();
    assignee_ids.sort_unstable();
    assignee_ids.dedup();

    let assignees: HashMap<Uuid, User> = state
        .repos
        .users
        .get_by_ids(&assignee_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    Ok(tasks
        .into_iter()
        .map(|task| {
            let assignee = task
                .assigned_to
                .and_then(|id| assignees.get(&id).cloned());
            TaskResponse::build(task, &project, &workspace, assignee)
        })
        .collect())
}

/// Create a task in a project.
///
/// **Business Rules:**
/// - Caller must be a member of the project's workspace
/// - An assignee, when given, must also be a member
pub async fn create_task(
    state: &WorkspacesState,
    user: &AuthIdentity,
    input: CreateTaskInput,
) -> Result<TaskResponse> {
    validate_input(&input)?;

    let (project, workspace) = load_project(state, input.project_id).await?;
    require_membership(state, workspace.id, user.id).await?;

    if let Some(assignee_id) = input.assigned_to {
        require_assignable(state, workspace.id, assignee_id).await?;
    }

    let description = input
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let task = Task::new(
        project.id,
        input.title.trim().to_string(),
        description,
        input.priority,
        input.assigned_to,
    );
    let task = state.repos.tasks.create(&task).await?;

    tracing::info!(
        task_id = %task.id,
        project_id = %project.id,
        created_by = %user.id,
        "Task created"
    );

    let assignee = load_assignee(state, &task).await?;
    Ok(TaskResponse::build(task, &project, &workspace, assignee))
}

/// Move a task to a new status; any workspace member may do this.
pub async fn update_task_status(
    state: &WorkspacesState,
    user: &AuthIdentity,
    input: UpdateTaskStatusInput,
) -> Result<TaskResponse> {
    let task = load_task(state, input.task_id).await?;
    let (project, workspace) = load_project(state, task.project_id).await?;
    require_membership(state, workspace.id, user.id).await?;

    let task = state
        .repos
        .tasks
        .update_status(task.id, input.status)
        .await?
        .ok_or_else(|| Error::NotFound("Task not found".to_string()))?;

    tracing::info!(
        task_id = %task.id,
        status = %task.status,
        updated_by = %user.id,
        "Task status updated"
    );

    let assignee = load_assignee(state, &task).await?;
    Ok(TaskResponse::build(task, &project, &workspace, assignee))
}

/// Assign a task to a workspace member; OWNER or ADMIN only.
pub async fn assign_task(
    state: &WorkspacesState,
    user: &AuthIdentity,
    input: AssignTaskInput,
) -> Result<TaskResponse> {
    let task = load_task(state, input.task_id).await?;
    let (project, workspace) = load_project(state, task.project_id).await?;
    require_admin(state, workspace.id, user.id, "assign tasks").await?;
    require_assignable(state, workspace.id, input.user_id).await?;

    let task = state
        .repos
        .tasks
        .assign(task.id, input.user_id)
        .await?
        .ok_or_else(|| Error::NotFound("Task not found".to_string()))?;

    tracing::info!(
        task_id = %task.id,
        assignee_id = %input.user_id,
        assigned_by = %user.id,
        "Task assigned"
    );

    let assignee = load_assignee(state, &task).await?;
    Ok(TaskResponse::build(task, &project, &workspace, assignee))
}
