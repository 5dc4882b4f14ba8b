//! Repository implementations for the Workspaces domain

pub mod memberships;
pub mod projects;
pub mod tasks;
pub mod transactions;
pub mod users;
pub mod workspaces;

use sqlx::{PgPool, Postgres, Transaction};

pub use memberships::{MembershipRepository, MembershipWithUser};
pub use projects::ProjectRepository;
pub use tasks::TaskRepository;
pub use transactions::{create_membership_tx, create_workspace_tx};
pub use users::UserRepository;
pub use workspaces::WorkspaceRepository;

/// Combined repository access for the Workspaces domain
#[derive(Clone)]
pub struct WorkspacesRepositories {
    pool: PgPool,
    pub users: UserRepository,
    pub workspaces: WorkspaceRepository,
    pub memberships: MembershipRepository,
    pub projects: ProjectRepository,
    pub tasks: TaskRepository,
}

impl WorkspacesRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            workspaces: WorkspaceRepository::new(pool.clone()),
            memberships: MembershipRepository::new(pool.clone()),
            projects: ProjectRepository::new(pool.clone()),
            tasks: TaskRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
