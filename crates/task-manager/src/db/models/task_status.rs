//! Task status database model.
//!
//! Statuses are the workflow columns of the board. Tasks reference them by
//! id internally and by slug on the wire.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Task status row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: NaiveDate,
}

/// Request to create a task status.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatusCreateRequest {
    pub name: String,
    pub slug: String,
}

/// Partial update of a task status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskStatusUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub slug: Option<String>,
}
