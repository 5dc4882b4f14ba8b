//! Domain layer for Workspaces

pub mod entities;
pub mod password;
pub mod validation;
