//! Task service.
//!
//! Resolves the references a task carries (status slug, assignee, labels)
//! before anything is written, so a missing reference is reported as 404
//! rather than surfacing as a storage conflict.

use std::collections::BTreeSet;

use crate::db::models::{
    TaskCreateRequest, TaskDetails, TaskFilter, TaskRecord, TaskResponse, TaskUpdateRequest,
};
use crate::error::{AppError, AppResult};
use crate::repository::SharedRepository;
use crate::validation;

/// Service for task operations.
#[derive(Clone)]
pub struct TaskService {
    repo: SharedRepository,
}

impl TaskService {
    /// Create a new task service.
    pub fn new(repo: SharedRepository) -> Self {
        Self { repo }
    }

    /// List tasks matching `filter`. Filtering by an unknown label is an error.
    pub async fn list(&self, filter: TaskFilter) -> AppResult<Vec<TaskResponse>> {
        if let Some(label_id) = filter.label_id {
            if self.repo.get_label(label_id).await?.is_none() {
                return Err(AppError::NotFound(format!("No label with id {}", label_id)));
            }
        }

        let tasks = self.repo.list_tasks(&filter).await?;
        Ok(tasks.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64) -> AppResult<TaskResponse> {
        self.find(id).await.map(Into::into)
    }

    pub async fn create(&self, request: TaskCreateRequest) -> AppResult<TaskResponse> {
        validation::not_blank("title", &request.title)?;

        let record = TaskRecord {
            name: request.title.trim().to_string(),
            task_index: request.index,
            description: request.content,
            task_status_id: self.status_id(&request.status).await?,
            assignee_id: self.check_assignee(request.assignee_id).await?,
        };
        let label_ids = self.check_labels(&request.task_label_ids).await?;

        let id = self.repo.insert_task(&record, &label_ids).await?;
        tracing::info!(task_id = id, status = %request.status, "Task created");

        self.get(id).await
    }

    /// Apply a partial update. A present `taskLabelIds` replaces the label set.
    pub async fn update(&self, id: i64, request: TaskUpdateRequest) -> AppResult<TaskResponse> {
        let existing = self.find(id).await?;
        let mut record = TaskRecord::from(&existing);

        if let Some(title) = request.title {
            validation::not_blank("title", &title)?;
            record.name = title.trim().to_string();
        }
        if let Some(index) = request.index {
            record.task_index = index;
        }
        if let Some(content) = request.content {
            record.description = content;
        }
        if let Some(slug) = request.status {
            record.task_status_id = self.status_id(&slug).await?;
        }
        if let Some(assignee_id) = request.assignee_id {
            record.assignee_id = self.check_assignee(assignee_id).await?;
        }
        let label_ids = match request.task_label_ids {
            Some(ids) => Some(self.check_labels(&ids).await?),
            None => None,
        };

        if !self
            .repo
            .update_task(id, &record, label_ids.as_deref())
            .await?
        {
            return Err(AppError::NotFound(format!("No task with id {}", id)));
        }
        tracing::info!(task_id = id, "Task updated");

        self.get(id).await
    }

    /// Delete a task. Missing ids are ignored.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if self.repo.delete_task(id).await? {
            tracing::info!(task_id = id, "Task deleted");
        }
        Ok(())
    }

    async fn find(&self, id: i64) -> AppResult<TaskDetails> {
        self.repo
            .get_task(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No task with id {}", id)))
    }

    async fn status_id(&self, slug: &str) -> AppResult<i64> {
        self.repo
            .find_status_by_slug(slug.trim())
            .await?
            .map(|status| status.id)
            .ok_or_else(|| AppError::NotFound(format!("No task status with slug '{}'", slug)))
    }

    async fn check_assignee(&self, assignee_id: Option<i64>) -> AppResult<Option<i64>> {
        let Some(id) = assignee_id else {
            return Ok(None);
        };
        match self.repo.get_user(id).await? {
            Some(user) => Ok(Some(user.id)),
            None => Err(AppError::NotFound(format!("No user with id {}", id))),
        }
    }

    /// Deduplicate and verify label ids.
    async fn check_labels(&self, ids: &[i64]) -> AppResult<Vec<i64>> {
        let unique: BTreeSet<i64> = ids.iter().copied().collect();
        for id in &unique {
            if self.repo.get_label(*id).await?.is_none() {
                return Err(AppError::NotFound(format!("No label with id {}", id)));
            }
        }
        Ok(unique.into_iter().collect())
    }
}
