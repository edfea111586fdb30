//! Configuration module for the Task Manager server.
//!
//! This module provides configuration loading from environment variables
//! using the `envy` crate for type-safe environment variable parsing.

mod app;
mod auth;
mod database;

pub use app::{AppConfig, StorageKind};
pub use auth::{AuthConfig, BCRYPT_COST_RANGE, MAX_TTL_SECONDS};
pub use database::DatabaseConfig;
