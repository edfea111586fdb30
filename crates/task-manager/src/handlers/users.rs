//! User API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Extension, Json,
};

use super::with_total_count;
use crate::auth::AuthUser;
use crate::db::models::{UserCreateRequest, UserResponse, UserUpdateRequest};
use crate::error::AppResult;
use crate::services::UserService;

/// `GET /api/users`
pub async fn list(State(service): State<UserService>) -> AppResult<Response> {
    Ok(with_total_count(service.list().await?))
}

/// `GET /api/users/{id}`
pub async fn get(
    State(service): State<UserService>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(service.get(id).await?))
}

/// Create a user with the regular user role.
///
/// `POST /api/users`
///
/// # Request Body
///
/// ```json
/// {
///   "firstName": "Ada",
///   "lastName": "Lovelace",
///   "email": "ada@example.com",
///   "password": "secret"
/// }
/// ```
pub async fn create(
    State(service): State<UserService>,
    Json(request): Json<UserCreateRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = service.create(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `PUT /api/users/{id}` (owner or administrator)
pub async fn update(
    State(service): State<UserService>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(request): Json<UserUpdateRequest>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(service.update(&caller, id, request).await?))
}

/// `DELETE /api/users/{id}` (owner or administrator)
pub async fn delete(
    State(service): State<UserService>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    service.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
