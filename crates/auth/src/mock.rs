//! In-memory identity store for tests and local wiring

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use uuid::Uuid;

use crate::store::{IdentityStore, IdentityStoreError};
use crate::types::AuthIdentity;

/// In-memory [`IdentityStore`].
///
/// Clones share the same underlying map, so a test can keep a handle and
/// add or remove users while a router holds another.
#[derive(Debug, Clone, Default)]
pub struct MockIdentityStore {
    users: Arc<RwLock<HashMap<Uuid, AuthIdentity>>>,
    failing: Arc<RwLock<bool>>,
}

impl MockIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a user, replacing any existing one with the same id
    pub fn insert(&self, user: AuthIdentity) {
        self.users
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(user.id, user);
    }

    /// Convenience: create and store a user with the given name.
    pub fn add_user(&self, name: &str) -> AuthIdentity {
        let user = AuthIdentity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            password_hash: "not-a-real-hash".to_string(),
            created_at: Utc::now(),
        };
        self.insert(user.clone());
        user
    }

    pub fn remove(&self, id: Uuid) -> Option<AuthIdentity> {
        self.users
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id)
    }

    /// Make every lookup fail until reset
    pub fn set_failing(&self, failing: bool) {
        *self.failing.write().unwrap_or_else(|e| e.into_inner()) = failing;
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl IdentityStore for MockIdentityStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<AuthIdentity>, IdentityStoreError> {
        if *self.failing.read().unwrap_or_else(|e| e.into_inner()) {
            return Err(IdentityStoreError::Unavailable(
                "mock store set to fail".to_string(),
            ));
        }

        Ok(self
            .users
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned())
    }
}
