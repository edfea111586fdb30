//! Task database queries.
//!
//! Reads join the status slug and aggregate label ids so a task is always
//! returned in one row.

use crate::db::models::{TaskDetails, TaskFilter, TaskRecord};
use crate::db::{write_error, DbPool};
use crate::error::AppResult;

const TASK_SELECT: &str = r#"
    SELECT t.id, t.name, t.task_index, t.description, t.task_status_id,
           s.slug AS status_slug, t.assignee_id, t.created_at,
           COALESCE(
               ARRAY_AGG(tl.label_id ORDER BY tl.label_id)
                   FILTER (WHERE tl.label_id IS NOT NULL),
               '{}'
           ) AS label_ids
    FROM tasks t
    JOIN task_statuses s ON s.id = t.task_status_id
    LEFT JOIN task_labels tl ON tl.task_id = t.id
"#;

/// Case-insensitive `LIKE` pattern matching `title` literally anywhere in
/// the name. `\`, `%` and `_` are escaped.
fn contains_pattern(title: &str) -> String {
    let mut pattern = String::with_capacity(title.len() + 2);
    pattern.push('%');
    for ch in title.to_lowercase().chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// List tasks matching every present filter.
pub async fn list_tasks(pool: &DbPool, filter: &TaskFilter) -> AppResult<Vec<TaskDetails>> {
    let title_pattern = filter.title_cont.as_deref().map(contains_pattern);

    let tasks = sqlx::query_as::<_, TaskDetails>(&format!(
        r#"
        {}
        WHERE ($1::TEXT IS NULL OR LOWER(t.name) LIKE $1 ESCAPE '\')
          AND ($2::TEXT IS NULL OR s.slug = $2)
          AND ($3::BIGINT IS NULL OR t.assignee_id = $3)
          AND ($4::BIGINT IS NULL OR EXISTS (
                SELECT 1 FROM task_labels f WHERE f.task_id = t.id AND f.label_id = $4))
        GROUP BY t.id, s.slug
        ORDER BY t.id
        "#,
        TASK_SELECT
    ))
    .bind(title_pattern)
    .bind(&filter.status)
    .bind(filter.assignee_id)
    .bind(filter.label_id)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Get a task by ID.
pub async fn get_task_by_id(pool: &DbPool, id: i64) -> AppResult<Option<TaskDetails>> {
    let task = sqlx::query_as::<_, TaskDetails>(&format!(
        "{} WHERE t.id = $1 GROUP BY t.id, s.slug",
        TASK_SELECT
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Insert a task and link its labels in one transaction.
pub async fn insert_task(pool: &DbPool, task: &TaskRecord, label_ids: &[i64]) -> AppResult<i64> {
    let mut tx = pool.begin().await?;

    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO tasks (name, task_index, description, task_status_id, assignee_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&task.name)
    .bind(task.task_index)
    .bind(&task.description)
    .bind(task.task_status_id)
    .bind(task.assignee_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(write_error("Task"))?;

    link_labels(&mut tx, id, label_ids).await?;
    tx.commit().await?;

    Ok(id)
}

/// Overwrite a task and optionally replace its labels in one transaction.
pub async fn update_task(
    pool: &DbPool,
    id: i64,
    task: &TaskRecord,
    label_ids: Option<&[i64]>,
) -> AppResult<bool> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE tasks
        SET name = $2, task_index = $3, description = $4, task_status_id = $5, assignee_id = $6
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&task.name)
    .bind(task.task_index)
    .bind(&task.description)
    .bind(task.task_status_id)
    .bind(task.assignee_id)
    .execute(&mut *tx)
    .await
    .map_err(write_error("Task"))?;

    if result.rows_affected() == 0 {
        return Ok(false);
    }

    if let Some(label_ids) = label_ids {
        sqlx::query("DELETE FROM task_labels WHERE task_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        link_labels(&mut tx, id, label_ids).await?;
    }
    tx.commit().await?;

    Ok(true)
}

async fn link_labels(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    task_id: i64,
    label_ids: &[i64],
) -> AppResult<()> {
    if label_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO task_labels (task_id, label_id)
        SELECT $1, UNNEST($2::BIGINT[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(task_id)
    .bind(label_ids)
    .execute(&mut **tx)
    .await
    .map_err(write_error("Task label"))?;

    Ok(())
}

/// Delete a task. Label links cascade.
pub async fn delete_task(pool: &DbPool, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Count all tasks.
pub async fn count_tasks(pool: &DbPool) -> AppResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Whether any task uses the status.
pub async fn status_in_use(pool: &DbPool, status_id: i64) -> AppResult<bool> {
    let used: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tasks WHERE task_status_id = $1)")
            .bind(status_id)
            .fetch_one(pool)
            .await?;

    Ok(used)
}

/// Whether any task is assigned to the user.
pub async fn user_has_tasks(pool: &DbPool, user_id: i64) -> AppResult<bool> {
    let used: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tasks WHERE assignee_id = $1)")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    Ok(used)
}

/// Whether any task carries the label.
pub async fn label_in_use(pool: &DbPool, label_id: i64) -> AppResult<bool> {
    let used: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM task_labels WHERE label_id = $1)")
            .bind(label_id)
            .fetch_one(pool)
            .await?;

    Ok(used)
}
