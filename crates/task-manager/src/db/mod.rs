//! Database module for the Task Manager server.
//!
//! This module provides database connectivity, models, and queries
//! for PostgreSQL using SQLx.

pub mod models;
pub mod pool;
pub mod queries;
mod repository;
pub mod schema;

pub use pool::{create_pool, DbPool};
pub use repository::PgRepository;
pub use schema::init_schema;

use crate::error::AppError;

/// Map constraint violations raised by a write to `Conflict`.
pub(crate) fn write_error(entity: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |err| {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::Conflict(format!("{} already exists", entity));
            }
            if db_err.is_foreign_key_violation() {
                return AppError::Conflict(format!(
                    "{} references or is referenced by another record",
                    entity
                ));
            }
        }
        AppError::Database(err)
    }
}
