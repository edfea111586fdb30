//! Application state for the Task Manager server.
//!
//! This module defines the shared application state that is
//! passed to all handlers via Axum's state management. Handlers pull the
//! service they need out of it through `FromRef`.

use axum::extract::FromRef;
use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenIssuer};
use crate::config::{AppConfig, AuthConfig};
use crate::repository::SharedRepository;
use crate::services::{AuthService, LabelService, TaskService, TaskStatusService, UserService};

/// Shared application state.
#[derive(Clone, FromRef)]
pub struct AppState {
    /// Active storage backend
    pub repo: SharedRepository,

    /// Application configuration
    pub config: Arc<AppConfig>,

    pub passwords: PasswordHasher,

    pub auth: AuthService,
    pub users: UserService,
    pub task_statuses: TaskStatusService,
    pub labels: LabelService,
    pub tasks: TaskService,

    /// Server start time for uptime calculation
    #[from_ref(skip)]
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Wire the services around a storage backend.
    pub fn new(repo: SharedRepository, config: AppConfig, auth_config: &AuthConfig) -> Self {
        let passwords = PasswordHasher::new(auth_config.bcrypt_cost);
        let tokens = TokenIssuer::new(auth_config);

        Self {
            auth: AuthService::new(repo.clone(), passwords, tokens),
            users: UserService::new(repo.clone(), passwords),
            task_statuses: TaskStatusService::new(repo.clone()),
            labels: LabelService::new(repo.clone()),
            tasks: TaskService::new(repo.clone()),
            repo,
            config: Arc::new(config),
            passwords,
            start_time: std::time::Instant::now(),
        }
    }

    /// Get the server uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
