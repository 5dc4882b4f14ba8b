//! Authentication for the Tasklane API
//!
//! Issues and verifies bearer tokens, resolves them to users through an
//! [`IdentityStore`], and carries the result through each request as a
//! [`RequestIdentity`]. The [`auth_gate`] middleware ties these together;
//! handlers read the identity with the [`CurrentUser`] and [`MaybeUser`]
//! extractors.

mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod gate;
pub mod jwt;
mod mock;
mod store;
mod types;

pub use claims::IdentityClaims;
pub use config::AuthConfig;
pub use context::RequestIdentity;
pub use error::AuthError;
pub use extractors::{CurrentUser, MaybeUser};
pub use gate::{auth_gate, AuthGate};
pub use jwt::{TokenError, TokenScope};
pub use mock::MockIdentityStore;
pub use store::{IdentityStore, IdentityStoreError, PgIdentityStore};
pub use types::AuthIdentity;
