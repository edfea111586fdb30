//! Label database model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Label row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: i64,
    pub name: String,
    pub created_at: NaiveDate,
}

/// Request to create a label.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelCreateRequest {
    pub name: String,
}

/// Partial update of a label.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
}
