//! Workspace resolvers: `workspaces`, `workspace`, `createWorkspace`,
//! `inviteUserToWorkspace`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklane_auth::AuthIdentity;
use tasklane_common::{validate_input, Error, RepositoryError, Result};
use uuid::Uuid;
use validator::Validate;

use super::accounts::UserResponse;
use super::projects::ProjectResponse;
use super::{require_admin, require_membership};
use crate::api::middleware::WorkspacesState;
use crate::domain::entities::{Membership, MembershipRole, Workspace};
use crate::domain::validation::{normalize_email, normalize_name, validate_not_blank};
use crate::repository::{create_membership_tx, create_workspace_tx, MembershipWithUser};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceInput {
    pub id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceInput {
    #[validate(
        length(min = 1, max = 100),
        custom(function = "validate_not_blank", message = "Name must not be blank")
    )]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InviteUserInput {
    pub workspace_id: Uuid,

    #[validate(email)]
    pub email: String,

    #[serde(default)]
    pub role: MembershipRole,
}

/// A member of a workspace with their user details
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: Uuid,
    pub role: MembershipRole,
    pub user: UserResponse,
    pub created_at: DateTime<Utc>,
}

impl From<MembershipWithUser> for MemberResponse {
    fn from(row: MembershipWithUser) -> Self {
        Self {
            id: row.id,
            role: row.role,
            user: UserResponse {
                id: row.user_id,
                name: row.user_name,
                email: row.user_email,
                created_at: row.user_created_at,
            },
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceResponse {
    pub id: Uuid,
    pub name: String,
    pub owner: Option<UserResponse>,
    pub members: Vec<MemberResponse>,
    pub projects: Vec<ProjectResponse>,
    pub created_at: DateTime<Utc>,
}

/// Assemble a workspace with its owner, members and projects.
async fn load_workspace(state: &WorkspacesState, workspace: Workspace) -> Result<WorkspaceResponse> {
    let members: Vec<MemberResponse> = state
        .repos
        .memberships
        .list_by_workspace(workspace.id)
        .await?
        .into_iter()
        .map(MemberResponse::from)
        .collect();

    // The owner is always a member; fall back to a direct lookup otherwise
    let owner = match members.iter().find(|m| m.user.id == workspace.owner_id) {
        Some(member) => Some(member.user.clone()),
        None => state
            .repos
            .users
            .get_by_id(workspace.owner_id)
            .await?
            .map(UserResponse::from),
    };

    let projects = state
        .repos
        .projects
        .list_by_workspace(workspace.id)
        .await?
        .into_iter()
        .map(ProjectResponse::from)
        .collect();

    Ok(WorkspaceResponse {
        id: workspace.id,
        name: workspace.name,
        owner,
        members,
        projects,
        created_at: workspace.created_at,
    })
}

/// Workspaces the caller belongs to
pub async fn list_workspaces(
    state: &WorkspacesState,
    user: &AuthIdentity,
) -> Result<Vec<WorkspaceResponse>> {
    let workspaces = state.repos.workspaces.list_for_user(user.id).await?;

    let mut responses = Vec::with_capacity(workspaces.len());
    for workspace in workspaces {
        responses.push(load_workspace(state, workspace).await?);
    }
    Ok(responses)
}

/// One workspace; the caller must be a member.
pub async fn get_workspace(
    state: &WorkspacesState,
    user: &AuthIdentity,
    input: WorkspaceInput,
) -> Result<WorkspaceResponse> {
    require_membership(state, input.id, user.id).await?;

    let workspace = state
        .repos
        .workspaces
        .get_by_id(input.id)
        .await?
        .ok_or_else(|| Error::NotFound("Workspace not found".to_string()))?;

    load_workspace(state, workspace).await
}

/// Create a workspace with the caller as its OWNER.
///
/// The workspace and the owner membership are written in one transaction.
pub async fn create_workspace(
    state: &WorkspacesState,
    user: &AuthIdentity,
    input: CreateWorkspaceInput,
) -> Result<WorkspaceResponse> {
    validate_input(&input)?;

    let workspace = Workspace::new(normalize_name(&input.name), user.id);
    let membership = Membership::new(workspace.id, user.id, MembershipRole::Owner);

    let mut tx = state.repos.begin().await?;
    let workspace = create_workspace_tx(&mut tx, &workspace).await?;
    create_membership_tx(&mut tx, &membership).await?;
    tx.commit().await?;

    tracing::info!(
        workspace_id = %workspace.id,
        owner_id = %user.id,
        "Workspace created"
    );

    load_workspace(state, workspace).await
}

/// Add an existing user to a workspace.
///
/// **Business Rules:**
/// - Caller must be OWNER or ADMIN of the workspace
/// - OWNER cannot be granted by invitation
/// - The invitee must already have an account
/// - A user can be a member of a workspace only once
pub async fn invite_user(
    state: &WorkspacesState,
    user: &AuthIdentity,
    input: InviteUserInput,
) -> Result<MemberResponse> {
    validate_input(&input)?;

    require_admin(state, input.workspace_id, user.id, "invite members").await?;

    if !input.role.is_invitable() {
        return Err(Error::Validation(format!(
            "Cannot invite a user with role {}",
            input.role
        )));
    }

    let invitee = state
        .repos
        .users
        .find_by_email(&normalize_email(&input.email))
        .await?
        .ok_or_else(|| Error::NotFound("No user with that email".to_string()))?;

    let membership = Membership::new(input.workspace_id, invitee.id, input.role);
    let membership = state
        .repos
        .memberships
        .create(&membership)
        .await
        .map_err(|e| match e {
            RepositoryError::AlreadyExists => Error::Conflict(
                "User is already a member of this workspace".to_string(),
            ),
            other => other.into(),
        })?;

    tracing::info!(
        workspace_id = %membership.workspace_id,
        user_id = %invitee.id,
        role = %membership.role,
        invited_by = %user.id,
        "User added to workspace"
    );

    Ok(MemberResponse {
        id: membership.id,
        role: membership.role,
        user: invitee.into(),
        created_at: membership.created_at,
    })
}
