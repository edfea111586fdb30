//! PostgreSQL implementation of [`Repository`].

use async_trait::async_trait;

use crate::db::models::{
    Label, NewUser, TaskDetails, TaskFilter, TaskRecord, TaskStatus, User,
};
use crate::db::pool::health_check;
use crate::db::queries::{label, task, task_status, user};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::repository::Repository;

/// Repository over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgRepository {
    pool: DbPool,
}

impl PgRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> bool {
        health_check(&self.pool).await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        user::list_users(&self.pool).await
    }

    async fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        user::get_user_by_id(&self.pool, id).await
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        user::get_user_by_email(&self.pool, email).await
    }

    async fn insert_user(&self, new_user: &NewUser) -> AppResult<User> {
        user::insert_user(&self.pool, new_user).await
    }

    async fn update_user(&self, row: &User) -> AppResult<User> {
        user::update_user(&self.pool, row)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No user with id {}", row.id)))
    }

    async fn delete_user(&self, id: i64) -> AppResult<bool> {
        user::delete_user(&self.pool, id).await
    }

    async fn count_users(&self) -> AppResult<i64> {
        user::count_users(&self.pool).await
    }

    async fn user_has_tasks(&self, id: i64) -> AppResult<bool> {
        task::user_has_tasks(&self.pool, id).await
    }

    async fn list_statuses(&self) -> AppResult<Vec<TaskStatus>> {
        task_status::list_statuses(&self.pool).await
    }

    async fn get_status(&self, id: i64) -> AppResult<Option<TaskStatus>> {
        task_status::get_status_by_id(&self.pool, id).await
    }

    async fn find_status_by_slug(&self, slug: &str) -> AppResult<Option<TaskStatus>> {
        task_status::get_status_by_slug(&self.pool, slug).await
    }

    async fn insert_status(&self, name: &str, slug: &str) -> AppResult<TaskStatus> {
        task_status::insert_status(&self.pool, name, slug).await
    }

    async fn update_status(&self, status: &TaskStatus) -> AppResult<TaskStatus> {
        task_status::update_status(&self.pool, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No task status with id {}", status.id)))
    }

    async fn delete_status(&self, id: i64) -> AppResult<bool> {
        task_status::delete_status(&self.pool, id).await
    }

    async fn status_in_use(&self, id: i64) -> AppResult<bool> {
        task::status_in_use(&self.pool, id).await
    }

    async fn list_labels(&self) -> AppResult<Vec<Label>> {
        label::list_labels(&self.pool).await
    }

    async fn get_label(&self, id: i64) -> AppResult<Option<Label>> {
        label::get_label_by_id(&self.pool, id).await
    }

    async fn insert_label(&self, name: &str) -> AppResult<Label> {
        label::insert_label(&self.pool, name).await
    }

    async fn update_label(&self, row: &Label) -> AppResult<Label> {
        label::update_label(&self.pool, row)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No label with id {}", row.id)))
    }

    async fn delete_label(&self, id: i64) -> AppResult<bool> {
        label::delete_label(&self.pool, id).await
    }

    async fn label_in_use(&self, id: i64) -> AppResult<bool> {
        task::label_in_use(&self.pool, id).await
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> AppResult<Vec<TaskDetails>> {
        task::list_tasks(&self.pool, filter).await
    }

    async fn get_task(&self, id: i64) -> AppResult<Option<TaskDetails>> {
        task::get_task_by_id(&self.pool, id).await
    }

    async fn insert_task(&self, record: &TaskRecord, label_ids: &[i64]) -> AppResult<i64> {
        task::insert_task(&self.pool, record, label_ids).await
    }

    async fn update_task(
        &self,
        id: i64,
        record: &TaskRecord,
        label_ids: Option<&[i64]>,
    ) -> AppResult<bool> {
        task::update_task(&self.pool, id, record, label_ids).await
    }

    async fn delete_task(&self, id: i64) -> AppResult<bool> {
        task::delete_task(&self.pool, id).await
    }

    async fn count_tasks(&self) -> AppResult<i64> {
        task::count_tasks(&self.pool).await
    }
}
