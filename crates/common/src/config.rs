//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Default token lifetime: 24 hours
const DEFAULT_JWT_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Longest accepted token lifetime: 365 days
pub const MAX_JWT_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

const DEFAULT_PORT: u16 = 8080;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// Token signing secret. `None` when unset or empty; requests carrying
    /// a bearer token then fail with a configuration fault.
    pub jwt_secret: Option<String>,
    pub jwt_ttl_seconds: i64,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,

    /// Browser origins allowed by CORS
    pub cors_allowed_origins: Vec<String>,

    /// Runtime configuration
    pub rust_log: String,
    pub log_format: String,
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("jwt_ttl_seconds", &self.jwt_ttl_seconds)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("rust_log", &self.rust_log)
            .field("log_format", &self.log_format)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let jwt_ttl_seconds = match var("JWT_TTL_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("JWT_TTL_SECONDS must be an integer, got {raw:?}"))?,
            None => DEFAULT_JWT_TTL_SECONDS,
        };

        if !(1..=MAX_JWT_TTL_SECONDS).contains(&jwt_ttl_seconds) {
            anyhow::bail!(
                "JWT_TTL_SECONDS must be between 1 and {MAX_JWT_TTL_SECONDS}, got {jwt_ttl_seconds}"
            );
        }

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]);

        let config = Self {
            database_url: var("DATABASE_URL")
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required"))?,

            jwt_secret: var("JWT_SECRET"),
            jwt_ttl_seconds,
            jwt_issuer: var("JWT_ISSUER"),
            jwt_audience: var("JWT_AUDIENCE"),

            cors_allowed_origins,

            rust_log: var("RUST_LOG").unwrap_or_else(|| "tasklane=debug,tower_http=info".to_string()),
            log_format: var("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
            port,
        };

        Ok(config)
    }
}
