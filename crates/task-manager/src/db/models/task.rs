//! Task database model.
//!
//! A task always has a status and may have an assignee and any number of
//! labels. The wire format renames a few columns: `name` is `title`,
//! `description` is `content` and the status is exposed by slug.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Task row joined with its status slug and label ids.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TaskDetails {
    pub id: i64,
    pub name: String,
    pub task_index: Option<i32>,
    pub description: Option<String>,
    pub task_status_id: i64,
    pub status_slug: String,
    pub assignee_id: Option<i64>,
    pub label_ids: Vec<i64>,
    pub created_at: NaiveDate,
}

/// Writable columns of a task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub name: String,
    pub task_index: Option<i32>,
    pub description: Option<String>,
    pub task_status_id: i64,
    pub assignee_id: Option<i64>,
}

impl From<&TaskDetails> for TaskRecord {
    fn from(task: &TaskDetails) -> Self {
        Self {
            name: task.name.clone(),
            task_index: task.task_index,
            description: task.description.clone(),
            task_status_id: task.task_status_id,
            assignee_id: task.assignee_id,
        }
    }
}

/// Filters accepted by `GET /api/tasks`. All present filters must match.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    /// Case-insensitive substring of the title
    pub title_cont: Option<String>,

    /// Status slug
    pub status: Option<String>,

    pub assignee_id: Option<i64>,

    pub label_id: Option<i64>,
}

/// Request to create a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateRequest {
    pub title: String,

    #[serde(default)]
    pub index: Option<i32>,

    #[serde(default)]
    pub content: Option<String>,

    /// Status slug
    pub status: String,

    #[serde(default, alias = "assignee_id", alias = "assignee")]
    pub assignee_id: Option<i64>,

    #[serde(default)]
    pub task_label_ids: Vec<i64>,
}

/// Partial update of a task. When `taskLabelIds` is present it replaces the
/// whole label set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub index: Option<Option<i32>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub content: Option<Option<String>>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(
        default,
        alias = "assignee_id",
        alias = "assignee",
        with = "::serde_with::rust::double_option"
    )]
    pub assignee_id: Option<Option<i64>>,

    #[serde(default)]
    pub task_label_ids: Option<Vec<i64>>,
}

/// Task as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub index: Option<i32>,
    pub created_at: NaiveDate,
    #[serde(rename = "assignee_id")]
    pub assignee_id: Option<i64>,
    pub title: String,
    pub content: Option<String>,
    pub status: String,
    pub task_label_ids: Vec<i64>,
}

impl From<TaskDetails> for TaskResponse {
    fn from(task: TaskDetails) -> Self {
        Self {
            id: task.id,
            index: task.task_index,
            created_at: task.created_at,
            assignee_id: task.assignee_id,
            title: task.name,
            content: task.description,
            status: task.status_slug,
            task_label_ids: task.label_ids,
        }
    }
}
