//! Workspaces domain: users, workspaces, memberships, projects, tasks

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::password::{
    hash_password, hash_password_task, verify_password, verify_password_task, PasswordError,
};

// Re-export repository types
pub use repository::{
    create_membership_tx, create_workspace_tx, MembershipRepository, MembershipWithUser,
    ProjectRepository, TaskRepository, UserRepository, WorkspaceRepository,
    WorkspacesRepositories,
};

// Re-export API types
pub use api::routes;
pub use api::WorkspacesState;
