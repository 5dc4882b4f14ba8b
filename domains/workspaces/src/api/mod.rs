//! API layer for the Workspaces domain
//!
//! Contains the `/query` dispatcher, its resolvers, and the domain state.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::WorkspacesState;
pub use routes::routes;
