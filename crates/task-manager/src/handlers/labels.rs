//! Label API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::with_total_count;
use crate::db::models::{Label, LabelCreateRequest, LabelUpdateRequest};
use crate::error::AppResult;
use crate::services::LabelService;

/// `GET /api/labels`
pub async fn list(State(service): State<LabelService>) -> AppResult<Response> {
    Ok(with_total_count(service.list().await?))
}

/// `GET /api/labels/{id}`
pub async fn get(
    State(service): State<LabelService>,
    Path(id): Path<i64>,
) -> AppResult<Json<Label>> {
    Ok(Json(service.get(id).await?))
}

/// `POST /api/labels`
pub async fn create(
    State(service): State<LabelService>,
    Json(request): Json<LabelCreateRequest>,
) -> AppResult<(StatusCode, Json<Label>)> {
    let label = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(label)))
}

/// `PUT /api/labels/{id}`
pub async fn update(
    State(service): State<LabelService>,
    Path(id): Path<i64>,
    Json(request): Json<LabelUpdateRequest>,
) -> AppResult<Json<Label>> {
    Ok(Json(service.update(id, request).await?))
}

/// `DELETE /api/labels/{id}`
pub async fn delete(
    State(service): State<LabelService>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
