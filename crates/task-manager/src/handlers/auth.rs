//! Login endpoints.

use axum::{extract::State, Extension, Json};

use crate::auth::{AuthUser, LoginRequest};
use crate::error::AppResult;
use crate::services::AuthService;

/// Exchange credentials for an access token.
///
/// `POST /api/login`
///
/// # Request Body
///
/// ```json
/// {"username": "hexlet@example.com", "password": "qwerty"}
/// ```
///
/// # Response
///
/// The raw JWT as `text/plain`.
pub async fn login(
    State(service): State<AuthService>,
    Json(request): Json<LoginRequest>,
) -> AppResult<String> {
    service.login(request).await
}

/// Answers `Authorized` to administrators.
///
/// `GET /api/admin`
pub async fn check_admin(Extension(caller): Extension<AuthUser>) -> AppResult<&'static str> {
    caller.ensure_admin()?;
    Ok("Authorized")
}
