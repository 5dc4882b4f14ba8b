//! Workspaces domain state

use std::sync::Arc;

use tasklane_auth::AuthConfig;

use crate::repository::WorkspacesRepositories;

/// Application state for the Workspaces domain
#[derive(Clone)]
pub struct WorkspacesState {
    pub repos: WorkspacesRepositories,
    /// Token issuance for register/login
    pub auth: Arc<AuthConfig>,
}
