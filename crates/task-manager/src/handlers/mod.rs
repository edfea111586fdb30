//! HTTP handlers for the Task Manager API.
//!
//! This module contains all route handlers organized by resource.

pub mod auth;
pub mod health;
pub mod labels;
pub mod task_statuses;
pub mod tasks;
pub mod users;

use axum::{
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub use health::{api_health, health_check};

/// Header carrying the number of items in a list response.
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Respond with a JSON list and its length in `X-Total-Count`.
pub fn with_total_count<T: Serialize>(items: Vec<T>) -> Response {
    let count = HeaderValue::from(items.len());
    ([(TOTAL_COUNT_HEADER, count)], Json(items)).into_response()
}
