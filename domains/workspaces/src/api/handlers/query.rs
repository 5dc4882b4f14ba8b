//! `/query` operation dispatcher
//!
//! **POST /query** with `{"operation": "<name>", "input": {...}}`.
//! Successful operations answer `{"data": ...}`; failures use the common
//! error envelope.

use axum::{extract::State, Json};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use tasklane_auth::MaybeUser;
use tasklane_common::{Error, JsonBody, Result};

use super::{accounts, projects, require_user, tasks, workspaces};
use crate::api::middleware::WorkspacesState;

/// Operation envelope
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub operation: String,
    #[serde(default)]
    pub input: Value,
}

fn parse_input<T: DeserializeOwned>(operation: &str, input: Value) -> Result<T> {
    serde_json::from_value(input)
        .map_err(|e| Error::Validation(format!("Invalid input for {}: {}", operation, e)))
}

fn data<T: Serialize>(payload: T) -> Result<Json<Value>> {
    Ok(Json(json!({ "data": serde_json::to_value(payload)? })))
}

/// Dispatch one operation.
///
/// `register` and `login` are open to anonymous callers; every other
/// operation needs an authenticated identity and checks it before
/// looking at the input.
pub async fn execute(
    caller: MaybeUser,
    State(state): State<WorkspacesState>,
    JsonBody(request): JsonBody<QueryRequest>,
) -> Result<Json<Value>> {
    let QueryRequest { operation, input } = request;
    let op = operation.as_str();

    tracing::debug!(
        operation = op,
        authenticated = caller.0.is_some(),
        "Executing operation"
    );

    match op {
        "register" => data(accounts::register(&state, parse_input(op, input)?).await?),
        "login" => data(accounts::login(&state, parse_input(op, input)?).await?),
        "me" => {
            let user = require_user(&caller)?;
            data(accounts::me(&user))
        }
        "workspaces" => {
            let user = require_user(&caller)?;
            data(workspaces::list_workspaces(&state, &user).await?)
        }
        "workspace" => {
            let user = require_user(&caller)?;
            data(workspaces::get_workspace(&state, &user, parse_input(op, input)?).await?)
        }
        "createWorkspace" => {
            let user = require_user(&caller)?;
            data(workspaces::create_workspace(&state, &user, parse_input(op, input)?).await?)
        }
        "inviteUserToWorkspace" => {
            let user = require_user(&caller)?;
            data(workspaces::invite_user(&state, &user, parse_input(op, input)?).await?)
        }
        "projects" => {
            let user = require_user(&caller)?;
            data(projects::list_projects(&state, &user, parse_input(op, input)?).await?)
        }
        "createProject" => {
            let user = require_user(&caller)?;
            data(projects::create_project(&state, &user, parse_input(op, input)?).await?)
        }
        "tasks" => {
            let user = require_user(&caller)?;
            data(tasks::list_tasks(&state, &user, parse_input(op, input)?).await?)
        }
        "createTask" => {
            let user = require_user(&caller)?;
            data(tasks::create_task(&state, &user, parse_input(op, input)?).await?)
        }
        "updateTaskStatus" => {
            let user = require_user(&caller)?;
            data(tasks::update_task_status(&state, &user, parse_input(op, input)?).await?)
        }
        "assignTask" => {
            let user = require_user(&caller)?;
            data(tasks::assign_task(&state, &user, parse_input(op, input)?).await?)
        }
        other => Err(Error::Validation(format!("Unknown operation: {}", other))),
    }
}
