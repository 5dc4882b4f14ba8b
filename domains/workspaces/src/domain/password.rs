//! Password hashing (Argon2id, PHC string format)
//!
//! Argon2 is CPU-bound for tens of milliseconds per call. Async callers use
//! [`hash_password_task`] and [`verify_password_task`], which run on the
//! blocking pool instead of a runtime worker.

use std::sync::OnceLock;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to generate salt: {0}")]
    Salt(String),

    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("password task failed: {0}")]
    Task(String),
}

impl From<PasswordError> for tasklane_common::Error {
    fn from(err: PasswordError) -> Self {
        tasklane_common::Error::Internal(err.to_string())
    }
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| PasswordError::Salt(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Salt(e.to_string()))?;

    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// Check a password against a stored hash. Unparseable hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Hash stand-in for accounts that do not exist.
///
/// Computed once with the same parameters as real hashes, so checking a
/// password against it costs the same as a real check.
fn placeholder_hash() -> &'static str {
    static PLACEHOLDER: OnceLock<String> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        hash_password("tasklane-placeholder-password").unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to build placeholder password hash");
            String::new()
        })
    })
}

/// [`hash_password`] on the blocking pool.
pub async fn hash_password_task(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))?
}

/// [`verify_password`] on the blocking pool.
///
/// With no stored hash the password is checked against a placeholder and
/// the result is always `false`, so unknown accounts take as long as wrong
/// passwords.
pub async fn verify_password_task(
    password: String,
    hash: Option<String>,
) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || match hash {
        Some(hash) => verify_password(&password, &hash),
        None => {
            let _ = verify_password(&password, placeholder_hash());
            false
        }
    })
    .await
    .map_err(|e| PasswordError::Task(e.to_string()))
}
