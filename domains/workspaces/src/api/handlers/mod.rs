//! Resolvers for the `/query` operations
//!
//! Each resolver takes the domain state plus the caller (when the
//! operation needs one) and returns a serializable payload. Authorization
//! rules live here; the auth gate only decides who the caller is.

pub mod accounts;
pub mod projects;
pub mod query;
pub mod tasks;
pub mod workspaces;

use std::sync::Arc;

use tasklane_auth::{AuthIdentity, CurrentUser, MaybeUser};
use tasklane_common::{Error, Result};
use uuid::Uuid;

use crate::api::middleware::WorkspacesState;
use crate::domain::entities::Membership;

/// The authenticated caller, or 401 for anonymous requests.
pub(crate) fn require_user(caller: &MaybeUser) -> Result<Arc<AuthIdentity>> {
    let CurrentUser(user) = CurrentUser::try_from(caller.clone())?;
    Ok(user)
}

/// The caller's membership in a workspace.
///
/// Missing workspaces are 404; existing workspaces the caller does not
/// belong to are 403.
pub(crate) async fn require_membership(
    state: &WorkspacesState,
    workspace_id: Uuid,
    user_id: Uuid,
) -> Result<Membership> {
    if let Some(membership) = state
        .repos
        .memberships
        .get_by_workspace_and_user(workspace_id, user_id)
        .await?
    {
        return Ok(membership);
    }

    match state.repos.workspaces.get_by_id(workspace_id).await? {
        Some(_) => Err(Error::Authorization(
            "You are not a member of this workspace".to_string(),
        )),
        None => Err(Error::NotFound("Workspace not found".to_string())),
    }
}

/// Like [`require_membership`], additionally requiring OWNER or ADMIN.
pub(crate) async fn require_admin(
    state: &WorkspacesState,
    workspace_id: Uuid,
    user_id: Uuid,
    action: &str,
) -> Result<Membership> {
    let membership = require_membership(state, workspace_id, user_id).await?;
    if !membership.role.can_admin() {
        return Err(Error::Authorization(format!(
            "Only workspace owners and admins can {}",
            action
        )));
    }
    Ok(membership)
}

/// Assignees must belong to the task's workspace.
pub(crate) async fn require_assignable(
    state: &WorkspacesState,
    workspace_id: Uuid,
    assignee_id: Uuid,
) -> Result<()> {
    let membership = state
        .repos
        .memberships
        .get_by_workspace_and_user(workspace_id, assignee_id)
        .await?;

    match membership {
        Some(_) => Ok(()),
        None => Err(Error::Validation(
            "Assignee must be a member of the workspace".to_string(),
        )),
    }
}
