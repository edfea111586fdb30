//! Task API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::with_total_count;
use crate::db::models::{TaskCreateRequest, TaskFilter, TaskResponse, TaskUpdateRequest};
use crate::error::AppResult;
use crate::services::TaskService;

/// List tasks.
///
/// `GET /api/tasks`
///
/// # Query Parameters
///
/// - `titleCont`: Case-insensitive substring of the title
/// - `status`: Status slug
/// - `assigneeId`: Assigned user id
/// - `labelId`: Attached label id
pub async fn list(
    State(service): State<TaskService>,
    Query(filter): Query<TaskFilter>,
) -> AppResult<Response> {
    Ok(with_total_count(service.list(filter).await?))
}

/// `GET /api/tasks/{id}`
pub async fn get(
    State(service): State<TaskService>,
    Path(id): Path<i64>,
) -> AppResult<Json<TaskResponse>> {
    Ok(Json(service.get(id).await?))
}

/// Create a task.
///
/// `POST /api/tasks`
///
/// # Request Body
///
/// ```json
/// {
///   "index": 123,
///   "assignee_id": 3,
///   "title": "Cleanness",
///   "content": "Dust the room.",
///   "status": "to_review",
///   "taskLabelIds": [1, 2]
/// }
/// ```
pub async fn create(
    State(service): State<TaskService>,
    Json(request): Json<TaskCreateRequest>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    let task = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /api/tasks/{id}`
pub async fn update(
    State(service): State<TaskService>,
    Path(id): Path<i64>,
    Json(request): Json<TaskUpdateRequest>,
) -> AppResult<Json<TaskResponse>> {
    Ok(Json(service.update(id, request).await?))
}

/// `DELETE /api/tasks/{id}`
pub async fn delete(
    State(service): State<TaskService>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
