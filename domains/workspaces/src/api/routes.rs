//! Route definitions for the Workspaces domain API

use axum::{routing::post, Router};

use super::handlers::query;
use super::middleware::WorkspacesState;

/// Create all Workspaces domain API routes
pub fn routes() -> Router<WorkspacesState> {
    Router::new().route("/query", post(query::execute))
}
