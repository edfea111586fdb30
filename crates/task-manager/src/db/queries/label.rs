//! Label database queries.

use crate::db::models::Label;
use crate::db::{write_error, DbPool};
use crate::error::AppResult;

/// List all labels ordered by id.
pub async fn list_labels(pool: &DbPool) -> AppResult<Vec<Label>> {
    let labels = sqlx::query_as::<_, Label>("SELECT id, name, created_at FROM labels ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(labels)
}

/// Get a label by ID.
pub async fn get_label_by_id(pool: &DbPool, id: i64) -> AppResult<Option<Label>> {
    let label =
        sqlx::query_as::<_, Label>("SELECT id, name, created_at FROM labels WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(label)
}

/// Insert a new label.
pub async fn insert_label(pool: &DbPool, name: &str) -> AppResult<Label> {
    let label = sqlx::query_as::<_, Label>(
        "INSERT INTO labels (name) VALUES ($1) RETURNING id, name, created_at",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .map_err(write_error("Label"))?;

    Ok(label)
}

/// Rename a label.
pub async fn update_label(pool: &DbPool, label: &Label) -> AppResult<Option<Label>> {
    let row = sqlx::query_as::<_, Label>(
        "UPDATE labels SET name = $2 WHERE id = $1 RETURNING id, name, created_at",
    )
    .bind(label.id)
    .bind(&label.name)
    .fetch_optional(pool)
    .await
    .map_err(write_error("Label"))?;

    Ok(row)
}

/// Delete a label.
pub async fn delete_label(pool: &DbPool, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM labels WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(write_error("Label"))?;

    Ok(result.rows_affected() > 0)
}
