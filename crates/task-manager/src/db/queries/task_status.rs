//! Task status database queries.

use crate::db::models::TaskStatus;
use crate::db::{write_error, DbPool};
use crate::error::AppResult;

/// List all task statuses ordered by id.
pub async fn list_statuses(pool: &DbPool) -> AppResult<Vec<TaskStatus>> {
    let statuses = sqlx::query_as::<_, TaskStatus>(
        "SELECT id, name, slug, created_at FROM task_statuses ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(statuses)
}

/// Get a task status by ID.
pub async fn get_status_by_id(pool: &DbPool, id: i64) -> AppResult<Option<TaskStatus>> {
    let status = sqlx::query_as::<_, TaskStatus>(
        "SELECT id, name, slug, created_at FROM task_statuses WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(status)
}

/// Get a task status by slug.
pub async fn get_status_by_slug(pool: &DbPool, slug: &str) -> AppResult<Option<TaskStatus>> {
    let status = sqlx::query_as::<_, TaskStatus>(
        "SELECT id, name, slug, created_at FROM task_statuses WHERE slug = $1",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(status)
}

/// Insert a new task status.
pub async fn insert_status(pool: &DbPool, name: &str, slug: &str) -> AppResult<TaskStatus> {
    let status = sqlx::query_as::<_, TaskStatus>(
        r#"
        INSERT INTO task_statuses (name, slug)
        VALUES ($1, $2)
        RETURNING id, name, slug, created_at
        "#,
    )
    .bind(name)
    .bind(slug)
    .fetch_one(pool)
    .await
    .map_err(write_error("Task status"))?;

    Ok(status)
}

/// Update a task status's name and slug.
pub async fn update_status(pool: &DbPool, status: &TaskStatus) -> AppResult<Option<TaskStatus>> {
    let row = sqlx::query_as::<_, TaskStatus>(
        r#"
        UPDATE task_statuses
        SET name = $2, slug = $3
        WHERE id = $1
        RETURNING id, name, slug, created_at
        "#,
    )
    .bind(status.id)
    .bind(&status.name)
    .bind(&status.slug)
    .fetch_optional(pool)
    .await
    .map_err(write_error("Task status"))?;

    Ok(row)
}

/// Delete a task status.
pub async fn delete_status(pool: &DbPool, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM task_statuses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(write_error("Task status"))?;

    Ok(result.rows_affected() > 0)
}
