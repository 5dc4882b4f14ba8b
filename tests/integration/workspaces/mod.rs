//! Workspaces domain integration tests
//!
//! End-to-end flows through `/query` against a real Postgres database:
//! accounts, workspace membership rules, projects and tasks. Each test
//! registers its own users with unique emails, so tests do not interfere.

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{error_code, id_of, TestApp};

mod test_accounts {
    use super::*;

    #[tokio::test]
    #[ignore = "requires a Postgres database (TEST_DATABASE_URL)"]
    async fn test_register_login_me_roundtrip() {
        let app = TestApp::new().await.unwrap();
        let ada = app.register("Ada").await.unwrap();

        let (status, body) = app
            .query(
                None,
                "login",
                json!({ "email": ada.email.to_uppercase(), "password": ada.password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let token = body["data"]["token"].as_str().unwrap().to_string();
        assert_eq!(body["data"]["user"]["id"], ada.id.to_string());

        let (status, body) = app.query(Some(&token), "me", Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], ada.id.to_string());
        assert!(!body.to_string().contains("argon2"));
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database (TEST_DATABASE_URL)"]
    async fn test_duplicate_email_is_conflict() {
        let app = TestApp::new().await.unwrap();
        let ada = app.register("Ada").await.unwrap();

        let (status, body) = app
            .query(
                None,
                "register",
                json!({ "name": "Other", "email": ada.email, "password": "another password" }),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error_code(&body), "CONFLICT");
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database (TEST_DATABASE_URL)"]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let app = TestApp::new().await.unwrap();
        let ada = app.register("Ada").await.unwrap();

        let (status, wrong_password) = app
            .query(
                None,
                "login",
                json!({ "email": ada.email, "password": "not the password" }),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, unknown_email) = app
            .query(
                None,
                "login",
                json!({ "email": "nobody@tasklane.test", "password": "whatever123" }),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password, unknown_email);
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database (TEST_DATABASE_URL)"]
    async fn test_token_for_deleted_user_is_rejected() {
        let app = TestApp::new().await.unwrap();
        let ada = app.register("Ada").await.unwrap();

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(ada.id)
            .execute(&app.pool)
            .await
            .unwrap();

        let (status, body) = app.query(Some(&ada.token), "me", Value::Null).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(&body), "INVALID_TOKEN");
    }
}

mod test_workspaces {
    use super::*;

    #[tokio::test]
    #[ignore = "requires a Postgres database (TEST_DATABASE_URL)"]
    async fn test_creator_becomes_owner() {
        let app = TestApp::new().await.unwrap();
        let ada = app.register("Ada").await.unwrap();

        let workspace_id = app.create_workspace(&ada, "Platform").await.unwrap();

        let (status, body) = app
            .query(Some(&ada.token), "workspace", json!({ "id": workspace_id }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Platform");
        assert_eq!(body["data"]["owner"]["id"], ada.id.to_string());
        assert_eq!(body["data"]["members"][0]["role"], "OWNER");

        let (status, body) = app.query(Some(&ada.token), "workspaces", Value::Null).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| id_of(w).unwrap())
            .collect();
        assert!(ids.contains(&workspace_id));
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database (TEST_DATABASE_URL)"]
    async fn test_non_member_cannot_read_workspace() {
        let app = TestApp::new().await.unwrap();
        let ada = app.register("Ada").await.unwrap();
        let eve = app.register("Eve").await.unwrap();
        let workspace_id = app.create_workspace(&ada, "Private").await.unwrap();

        let (status, body) = app
            .query(Some(&eve.token), "workspace", json!({ "id": workspace_id }))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(error_code(&body), "AUTHORIZATION_ERROR");

        let (status, _) = app
            .query(
                Some(&eve.token),
                "projects",
                json!({ "workspaceId": workspace_id }),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database (TEST_DATABASE_URL)"]
    async fn test_invitation_rules() {
        let app = TestApp::new().await.unwrap();
        let ada = app.register("Ada").await.unwrap();
        let grace = app.register("Grace").await.unwrap();
        let linus = app.register("Linus").await.unwrap();
        let workspace_id = app.create_workspace(&ada, "Team").await.unwrap();

        // OWNER cannot be handed out
        let (status, _) = app
            .query(
                Some(&ada.token),
                "inviteUserToWorkspace",
                json!({ "workspaceId": workspace_id, "email": grace.email, "role": "OWNER" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        app.invite(&ada, workspace_id, &grace, "MEMBER").await.unwrap();

        // Already a member
        let (status, body) = app
            .query(
                Some(&ada.token),
                "inviteUserToWorkspace",
                json!({ "workspaceId": workspace_id, "email": grace.email, "role": "ADMIN" }),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error_code(&body), "CONFLICT");

        // Members cannot invite
        let (status, _) = app
            .query(
                Some(&grace.token),
                "inviteUserToWorkspace",
                json!({ "workspaceId": workspace_id, "email": linus.email, "role": "MEMBER" }),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Unknown invitee
        let (status, _) = app
            .query(
                Some(&ada.token),
                "inviteUserToWorkspace",
                json!({ "workspaceId": workspace_id, "email": "ghost@tasklane.test", "role": "MEMBER" }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database (TEST_DATABASE_URL)"]
    async fn test_admin_can_invite_and_create_projects() {
        let app = TestApp::new().await.unwrap();
        let ada = app.register("Ada").await.unwrap();
        let grace = app.register("Grace").await.unwrap();
        let linus = app.register("Linus").await.unwrap();
        let workspace_id = app.create_workspace(&ada, "Team").await.unwrap();

        app.invite(&ada, workspace_id, &grace, "ADMIN").await.unwrap();
        app.invite(&grace, workspace_id, &linus, "MEMBER").await.unwrap();

        app.create_project(&grace, workspace_id, "Roadmap")
            .await
            .unwrap();

        let (status, body) = app
            .query(
                Some(&linus.token),
                "createProject",
                json!({ "workspaceId": workspace_id, "name": "Side quest" }),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{body}");

        let (status, body) = app
            .query(
                Some(&linus.token),
                "projects",
                json!({ "workspaceId": workspace_id }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["name"], "Roadmap");
    }
}

mod test_tasks {
    use super::*;

    #[tokio::test]
    #[ignore = "requires a Postgres database (TEST_DATABASE_URL)"]
    async fn test_task_lifecycle() {
        let app = TestApp::new().await.unwrap();
        let ada = app.register("Ada").await.unwrap();
        let grace = app.register("Grace").await.unwrap();
        let workspace_id = app.create_workspace(&ada, "Team").await.unwrap();
        app.invite(&ada, workspace_id, &grace, "MEMBER").await.unwrap();
        let project_id = app.create_project(&ada, workspace_id, "Launch").await.unwrap();

        // Members may create tasks
        let (status, body) = app
            .query(
                Some(&grace.token),
                "createTask",
                json!({ "projectId": project_id, "title": "Write docs", "priority": "HIGH" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["status"], "TODO");
        assert_eq!(body["data"]["priority"], "HIGH");
        assert!(body["data"]["assignedTo"].is_null());
        let task_id = id_of(&body["data"]).unwrap();

        // Members may move tasks
        let (status, body) = app
            .query(
                Some(&grace.token),
                "updateTaskStatus",
                json!({ "taskId": task_id, "status": "IN_PROGRESS" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "IN_PROGRESS");

        // Only owners and admins assign
        let (status, _) = app
            .query(
                Some(&grace.token),
                "assignTask",
                json!({ "taskId": task_id, "userId": grace.id }),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app
            .query(
                Some(&ada.token),
                "assignTask",
                json!({ "taskId": task_id, "userId": grace.id }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["assignedTo"]["id"], grace.id.to_string());

        let (status, body) = app
            .query(Some(&grace.token), "tasks", json!({ "projectId": project_id }))
            .await;
        assert_eq!(status, StatusCode::OK);
        let task = &body["data"][0];
        assert_eq!(task["assignedTo"]["name"], "Grace");
        assert_eq!(task["project"]["workspace"]["id"], workspace_id.to_string());
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database (TEST_DATABASE_URL)"]
    async fn test_assignee_must_be_member() {
        let app = TestApp::new().await.unwrap();
        let ada = app.register("Ada").await.unwrap();
        let outsider = app.register("Outsider").await.unwrap();
        let workspace_id = app.create_workspace(&ada, "Team").await.unwrap();
        let project_id = app.create_project(&ada, workspace_id, "Launch").await.unwrap();

        let (status, body) = app
            .query(
                Some(&ada.token),
                "createTask",
                json!({ "projectId": project_id, "title": "Secret", "assignedTo": outsider.id }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&body), "VALIDATION_ERROR");
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database (TEST_DATABASE_URL)"]
    async fn test_outsider_cannot_see_tasks() {
        let app = TestApp::new().await.unwrap();
        let ada = app.register("Ada").await.unwrap();
        let eve = app.register("Eve").await.unwrap();
        let workspace_id = app.create_workspace(&ada, "Team").await.unwrap();
        let project_id = app.create_project(&ada, workspace_id, "Launch").await.unwrap();

        let (status, _) = app
            .query(Some(&eve.token), "tasks", json!({ "projectId": project_id }))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .query(
                Some(&eve.token),
                "tasks",
                json!({ "projectId": uuid::Uuid::new_v4() }),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
