//! Tasklane application composition root
//!
//! Builds the auth gate and domain state from configuration and composes
//! them into a single router.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use sqlx::PgPool;
use tasklane_auth::{auth_gate, AuthConfig, AuthGate, PgIdentityStore};
use tasklane_common::Config;
use tasklane_workspaces::{WorkspacesRepositories, WorkspacesState};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Auth settings derived from process configuration
pub fn auth_config(config: &Config) -> AuthConfig {
    AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        // Out-of-range lifetimes surface as token issue errors
        token_ttl: chrono::Duration::try_seconds(config.jwt_ttl_seconds)
            .unwrap_or(chrono::Duration::MAX),
        issuer: config.jwt_issuer.clone(),
        audience: config.jwt_audience.clone(),
    }
}

/// Apply pending migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// Create the main application router with all routes and middleware
pub fn create_app(config: &Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let auth = Arc::new(auth_config(config));

    if auth.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET is not set; requests carrying a bearer token will fail");
    }

    let gate = AuthGate::new(auth.clone(), Arc::new(PgIdentityStore::new(pool.clone())));

    let state = WorkspacesState {
        repos: WorkspacesRepositories::new(pool),
        auth,
    };

    let app = build_router(state, gate).layer(cors_layer(&config.cors_allowed_origins)?);

    Ok(app)
}

/// Compose domain routes behind the auth gate with the open infrastructure routes.
pub fn build_router(state: WorkspacesState, gate: AuthGate) -> Router {
    let api = tasklane_workspaces::routes()
        .route_layer(middleware::from_fn_with_state(gate, auth_gate))
        .with_state(state);

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(|| async { "Tasklane API v0.1.0" }))
        .merge(api)
}

/// CORS policy for the browser client.
///
/// Credentials are allowed, so origins must be listed explicitly.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, anyhow::Error> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| anyhow::anyhow!("Invalid CORS origin: {origin:?}"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
