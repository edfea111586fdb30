//! Task status service.

use crate::db::models::{TaskStatus, TaskStatusCreateRequest, TaskStatusUpdateRequest};
use crate::error::{AppError, AppResult};
use crate::repository::SharedRepository;
use crate::validation;

/// Service for task status operations.
#[derive(Clone)]
pub struct TaskStatusService {
    repo: SharedRepository,
}

impl TaskStatusService {
    /// Create a new task status service.
    pub fn new(repo: SharedRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> AppResult<Vec<TaskStatus>> {
        self.repo.list_statuses().await
    }

    pub async fn get(&self, id: i64) -> AppResult<TaskStatus> {
        self.repo
            .get_status(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No task status with id {}", id)))
    }

    pub async fn create(&self, request: TaskStatusCreateRequest) -> AppResult<TaskStatus> {
        let name = request.name.trim();
        let slug = request.slug.trim();
        validation::not_blank("name", name)?;
        validation::not_blank("slug", slug)?;

        let status = self.repo.insert_status(name, slug).await?;
        tracing::info!(status_id = status.id, slug = %status.slug, "Task status created");
        Ok(status)
    }

    pub async fn update(&self, id: i64, request: TaskStatusUpdateRequest) -> AppResult<TaskStatus> {
        let mut status = self.get(id).await?;

        if let Some(name) = request.name {
            validation::not_blank("name", &name)?;
            status.name = name.trim().to_string();
        }
        if let Some(slug) = request.slug {
            validation::not_blank("slug", &slug)?;
            status.slug = slug.trim().to_string();
        }

        self.repo.update_status(&status).await
    }

    /// Delete a status no task uses. Missing ids are ignored.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if self.repo.status_in_use(id).await? {
            return Err(AppError::Conflict(format!(
                "Task status {} is used by a task and cannot be deleted",
                id
            )));
        }

        if self.repo.delete_status(id).await? {
            tracing::info!(status_id = id, "Task status deleted");
        }
        Ok(())
    }
}
