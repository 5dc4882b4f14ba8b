//! Account resolvers: `register`, `login`, `me`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklane_auth::AuthIdentity;
use tasklane_common::{validate_input, Error, RepositoryError, Result};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::WorkspacesState;
use crate::domain::entities::User;
use crate::domain::password::{hash_password_task, verify_password_task};
use crate::domain::validation::{normalize_email, normalize_name, validate_not_blank};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(
        length(min = 1, max = 100),
        custom(function = "validate_not_blank", message = "Name must not be blank")
    )]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

impl From<&AuthIdentity> for UserResponse {
    fn from(identity: &AuthIdentity) -> Self {
        Self {
            id: identity.id,
            name: identity.name.clone(),
            email: identity.email.clone(),
            created_at: identity.created_at,
        }
    }
}

/// Token plus the user it was issued for
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub token: String,
    pub user: UserResponse,
}

/// Create an account and sign it in.
///
/// **Business Rules:**
/// - Emails are stored trimmed and lowercased, and must be unique
/// - The password is stored only as an Argon2 hash
pub async fn register(state: &WorkspacesState, input: RegisterInput) -> Result<AuthPayload> {
    validate_input(&input)?;

    let email = normalize_email(&input.email);
    let name = normalize_name(&input.name);

    if state.repos.users.find_by_email(&email).await?.is_some() {
        return Err(Error::Conflict("Email is already registered".to_string()));
    }

    let password_hash = hash_password_task(input.password).await?;
    let user = User::new(name, email, password_hash);

    let user = state
        .repos
        .users
        .create(&user)
        .await
        .map_err(|e| match e {
            RepositoryError::AlreadyExists => {
                Error::Conflict("Email is already registered".to_string())
            }
            other => other.into(),
        })?;

    let token = state.auth.issue_token(user.id)?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(AuthPayload {
        token,
        user: user.into(),
    })
}

/// Exchange email and password for a token.
///
/// Unknown emails and wrong passwords produce the same error, and both
/// pay for one password verification.
pub async fn login(state: &WorkspacesState, input: LoginInput) -> Result<AuthPayload> {
    validate_input(&input)?;

    let email = normalize_email(&input.email);

    let user = state.repos.users.find_by_email(&email).await?;
    let stored_hash = user.as_ref().map(|user| user.password_hash.clone());

    let user = match (user, verify_password_task(input.password, stored_hash).await?) {
        (Some(user), true) => user,
        _ => return Err(Error::Authentication(INVALID_CREDENTIALS.to_string())),
    };

    let token = state.auth.issue_token(user.id)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(AuthPayload {
        token,
        user: user.into(),
    })
}

/// The caller, read straight from the request identity.
pub fn me(user: &AuthIdentity) -> UserResponse {
    UserResponse::from(user)
}
