//! Transactional free functions for the Workspaces domain

use crate::domain::entities::{Membership, Workspace};
use sqlx::{Postgres, Transaction};

/// Create a workspace within an existing transaction.
pub async fn create_workspace_tx(
    transaction: &mut Transaction<'_, Postgres>,
    workspace: &Workspace,
) -> std::result::Result<Workspace, sqlx::Error> {
    let created = sqlx::query_as::<_, Workspace>(
        r#"
        INSERT INTO workspaces (id, name, owner_id, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, owner_id, created_at
        "#,
    )
    .bind(workspace.id)
    .bind(&workspace.name)
    .bind(workspace.owner_id)
    .bind(workspace.created_at)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(created)
}

/// Create a membership within an existing transaction.
pub async fn create_membership_tx(
    transaction: &mut Transaction<'_, Postgres>,
    membership: &Membership,
) -> std::result::Result<Membership, sqlx::Error> {
    let created = sqlx::query_as::<_, Membership>(
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
    .fetch_one(&mut **transaction)
    .await?;
    Ok(created)
}
