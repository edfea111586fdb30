//! Application configuration for the Task Manager server.

use serde::Deserialize;
use std::str::FromStr;

use crate::error::AppError;

/// Application configuration loaded from environment variables.
///
/// Environment variables are prefixed with `TASK_MANAGER_`:
/// - `TASK_MANAGER_HOST`: Server bind address (default: "0.0.0.0")
/// - `TASK_MANAGER_PORT`: Server port (default: 8080)
/// - `TASK_MANAGER_DEBUG`: Enable debug mode (default: false)
/// - `TASK_MANAGER_STORAGE`: Storage backend, `postgres` or `memory` (default: "memory")
/// - `TASK_MANAGER_SEED_DEMO_DATA`: Fill empty tables with random demo data (default: false)
/// - `TASK_MANAGER_ADMIN_EMAIL` / `TASK_MANAGER_ADMIN_PASSWORD`: Bootstrap administrator
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable debug mode
    #[serde(default)]
    pub debug: bool,

    /// Storage backend name
    #[serde(default = "default_storage")]
    pub storage: String,

    /// Seed random users and tasks on startup
    #[serde(default)]
    pub seed_demo_data: bool,

    /// Email of the administrator created on startup
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// Password of the administrator created on startup
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> String {
    "memory".to_string()
}

fn default_admin_email() -> String {
    "hexlet@example.com".to_string()
}

fn default_admin_password() -> String {
    "qwerty".to_string()
}

/// Persistence backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// PostgreSQL through a SQLx pool
    Postgres,
    /// Process-local tables, lost on restart
    Memory,
}

impl FromStr for StorageKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageKind::Postgres),
            "memory" | "mem" => Ok(StorageKind::Memory),
            other => Err(AppError::Config(format!(
                "Unknown storage backend '{}', expected 'postgres' or 'memory'",
                other
            ))),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are prefixed with `TASK_MANAGER_`.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("TASK_MANAGER_").from_env::<AppConfig>()
    }

    /// Get the server bind address as a string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse the configured storage backend.
    pub fn storage_kind(&self) -> Result<StorageKind, AppError> {
        self.storage.parse()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
            storage: default_storage(),
            seed_demo_data: false,
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
        }
    }
}
