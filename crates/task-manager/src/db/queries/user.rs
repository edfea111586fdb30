//! User database queries.

use crate::db::models::{NewUser, User};
use crate::db::{write_error, DbPool};
use crate::error::AppResult;

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, role, created_at, updated_at";

/// List all users ordered by id.
pub async fn list_users(pool: &DbPool) -> AppResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users ORDER BY id",
        USER_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Get a user by ID.
pub async fn get_user_by_id(pool: &DbPool, id: i64) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE id = $1",
        USER_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get a user by email.
pub async fn get_user_by_email(pool: &DbPool, email: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = $1",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Insert a new user.
pub async fn insert_user(pool: &DbPool, user: &NewUser) -> AppResult<User> {
    let row = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (first_name, last_name, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.role.as_str())
    .fetch_one(pool)
    .await
    .map_err(write_error("User"))?;

    Ok(row)
}

/// Overwrite a user's columns.
pub async fn update_user(pool: &DbPool, user: &User) -> AppResult<Option<User>> {
    let row = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET first_name = $2, last_name = $3, email = $4, password_hash = $5,
            role = $6, updated_at = CURRENT_DATE
        WHERE id = $1
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(user.id)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.role)
    .fetch_optional(pool)
    .await
    .map_err(write_error("User"))?;

    Ok(row)
}

/// Delete a user.
pub async fn delete_user(pool: &DbPool, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(write_error("User"))?;

    Ok(result.rows_affected() > 0)
}

/// Count all users.
pub async fn count_users(pool: &DbPool) -> AppResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
