//! Task status API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::with_total_count;
use crate::db::models::{TaskStatus, TaskStatusCreateRequest, TaskStatusUpdateRequest};
use crate::error::AppResult;
use crate::services::TaskStatusService;

/// `GET /api/task_statuses`
pub async fn list(State(service): State<TaskStatusService>) -> AppResult<Response> {
    Ok(with_total_count(service.list().await?))
}

/// `GET /api/task_statuses/{id}`
pub async fn get(
    State(service): State<TaskStatusService>,
    Path(id): Path<i64>,
) -> AppResult<Json<TaskStatus>> {
    Ok(Json(service.get(id).await?))
}

/// `POST /api/task_statuses`
///
/// ```json
/// {"name": "Draft", "slug": "draft"}
/// ```
pub async fn create(
    State(service): State<TaskStatusService>,
    Json(request): Json<TaskStatusCreateRequest>,
) -> AppResult<(StatusCode, Json<TaskStatus>)> {
    let status = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(status)))
}

/// `PUT /api/task_statuses/{id}`
pub async fn update(
    State(service): State<TaskStatusService>,
    Path(id): Path<i64>,
    Json(request): Json<TaskStatusUpdateRequest>,
) -> AppResult<Json<TaskStatus>> {
    Ok(Json(service.update(id, request).await?))
}

/// `DELETE /api/task_statuses/{id}`
pub async fn delete(
    State(service): State<TaskStatusService>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
