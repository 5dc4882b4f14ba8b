//! Shared utilities, configuration, and error handling for Tasklane
//!
//! This crate provides common functionality used across the Tasklane backend:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Repository error classification
//! - JSON body extraction and input validation

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{validate_input, JsonBody};
