//! Table definitions, applied idempotently at startup.

use crate::db::DbPool;
use crate::error::AppResult;

const SCHEMA: &str = include_str!("schema.sql");

/// Create any missing tables and indexes.
pub async fn init_schema(pool: &DbPool) -> AppResult<()> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    tracing::info!("Database schema ready");
    Ok(())
}
