//! Label service.

use crate::db::models::{Label, LabelCreateRequest, LabelUpdateRequest};
use crate::error::{AppError, AppResult};
use crate::repository::SharedRepository;
use crate::validation::{self, MAX_LABEL_LEN, MIN_LABEL_LEN};

/// Service for label operations.
#[derive(Clone)]
pub struct LabelService {
    repo: SharedRepository,
}

impl LabelService {
    /// Create a new label service.
    pub fn new(repo: SharedRepository) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> AppResult<Vec<Label>> {
        self.repo.list_labels().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Label> {
        self.repo
            .get_label(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No label with id {}", id)))
    }

    pub async fn create(&self, request: LabelCreateRequest) -> AppResult<Label> {
        let name = request.name.trim();
        validation::length("name", name, MIN_LABEL_LEN, MAX_LABEL_LEN)?;

        let label = self.repo.insert_label(name).await?;
        tracing::info!(label_id = label.id, name = %label.name, "Label created");
        Ok(label)
    }

    pub async fn update(&self, id: i64, request: LabelUpdateRequest) -> AppResult<Label> {
        let mut label = self.get(id).await?;

        if let Some(name) = request.name {
            validation::length("name", &name, MIN_LABEL_LEN, MAX_LABEL_LEN)?;
            label.name = name.trim().to_string();
        }

        self.repo.update_label(&label).await
    }

    /// Delete a label not attached to any task. Missing ids are ignored.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if self.repo.label_in_use(id).await? {
            return Err(AppError::Conflict(format!(
                "Label {} is attached to a task and cannot be deleted",
                id
            )));
        }

        if self.repo.delete_label(id).await? {
            tracing::info!(label_id = id, "Label deleted");
        }
        Ok(())
    }
}
