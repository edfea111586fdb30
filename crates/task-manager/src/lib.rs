//! Task Manager Library
//!
//! This crate provides a small team task board served over HTTP:
//!
//! - **Users**: Accounts that log in and get tasks assigned
//! - **Task Statuses**: Workflow columns identified by a slug
//! - **Labels**: Free-form tags attached to tasks
//! - **Tasks**: Filterable work items tying the above together
//!
//! ## Architecture
//!
//! Handlers stay thin and call into services, which validate input and
//! enforce referential rules before going through the [`repository::Repository`]
//! trait. PostgreSQL backs the repository at runtime; an in-process store
//! serves development and tests. Every `/api` route except login requires a
//! JWT issued by the service itself.
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from environment variables
//! - [`auth`]: Password hashing, tokens and the request guard
//! - [`db`]: Database connectivity, models and queries
//! - [`repository`]: Storage trait and the in-memory backend
//! - [`services`]: Business rules per entity
//! - [`handlers`]: HTTP route handlers
//! - [`router`]: Route table
//! - [`bootstrap`]: Startup data
//! - [`error`]: Custom error types with Axum integration
//! - [`state`]: Shared application state
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use task_manager::{
//!     config::{AppConfig, AuthConfig},
//!     repository::MemoryRepository,
//!     router::build_router,
//!     state::AppState,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repo = Arc::new(MemoryRepository::new());
//!     let state = AppState::new(repo, AppConfig::default(), &AuthConfig::default());
//!     task_manager::bootstrap::run(&state).await?;
//!     let app = build_router(state);
//!     // ... bind and serve
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod result_ext;
pub mod router;
pub mod services;
pub mod state;
pub mod validation;

pub use error::{AppError, AppResult};
pub use result_ext::ResultExt;
