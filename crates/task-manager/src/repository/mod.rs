//! Persistence seam between the services and a storage backend.
//!
//! [`crate::db::PgRepository`] backs a running server with PostgreSQL;
//! [`MemoryRepository`] keeps everything in process for development and
//! tests. Both enforce the same uniqueness and reference rules and report
//! violations as [`crate::error::AppError::Conflict`].

mod memory;

use async_trait::async_trait;
use std::sync::Arc;

use crate::db::models::{
    Label, NewUser, TaskDetails, TaskFilter, TaskRecord, TaskStatus, User,
};
use crate::error::AppResult;

pub use memory::MemoryRepository;

/// Shared handle to the active backend.
pub type SharedRepository = Arc<dyn Repository>;

#[async_trait]
pub trait Repository: Send + Sync {
    /// Short backend name for health reports.
    fn backend(&self) -> &'static str;

    async fn health_check(&self) -> bool;

    // Users

    async fn list_users(&self) -> AppResult<Vec<User>>;

    async fn get_user(&self, id: i64) -> AppResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn insert_user(&self, user: &NewUser) -> AppResult<User>;

    /// Persist every column of `user` and bump `updated_at`.
    async fn update_user(&self, user: &User) -> AppResult<User>;

    async fn delete_user(&self, id: i64) -> AppResult<bool>;

    async fn count_users(&self) -> AppResult<i64>;

    /// Whether any task is assigned to the user.
    async fn user_has_tasks(&self, id: i64) -> AppResult<bool>;

    // Task statuses

    async fn list_statuses(&self) -> AppResult<Vec<TaskStatus>>;

    async fn get_status(&self, id: i64) -> AppResult<Option<TaskStatus>>;

    async fn find_status_by_slug(&self, slug: &str) -> AppResult<Option<TaskStatus>>;

    async fn insert_status(&self, name: &str, slug: &str) -> AppResult<TaskStatus>;

    async fn update_status(&self, status: &TaskStatus) -> AppResult<TaskStatus>;

    async fn delete_status(&self, id: i64) -> AppResult<bool>;

    async fn status_in_use(&self, id: i64) -> AppResult<bool>;

    // Labels

    async fn list_labels(&self) -> AppResult<Vec<Label>>;

    async fn get_label(&self, id: i64) -> AppResult<Option<Label>>;

    async fn insert_label(&self, name: &str) -> AppResult<Label>;

    async fn update_label(&self, label: &Label) -> AppResult<Label>;

    async fn delete_label(&self, id: i64) -> AppResult<bool>;

    async fn label_in_use(&self, id: i64) -> AppResult<bool>;

    // Tasks

    async fn list_tasks(&self, filter: &TaskFilter) -> AppResult<Vec<TaskDetails>>;

    async fn get_task(&self, id: i64) -> AppResult<Option<TaskDetails>>;

    /// Insert a task with its labels, returning the new id.
    async fn insert_task(&self, task: &TaskRecord, label_ids: &[i64]) -> AppResult<i64>;

    /// Overwrite a task's columns; when `label_ids` is given the label set
    /// is replaced. Returns `false` if the task does not exist.
    async fn update_task(
        &self,
        id: i64,
        task: &TaskRecord,
        label_ids: Option<&[i64]>,
    ) -> AppResult<bool>;

    async fn delete_task(&self, id: i64) -> AppResult<bool>;

    async fn count_tasks(&self) -> AppResult<i64>;
}
