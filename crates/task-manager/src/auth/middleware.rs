//! Middleware protecting the `/api` routes.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::{AppError, AppResult};
use crate::services::AuthService;

/// Credentials presented in an `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Basic { email: String, password: String },
}

/// Parse an `Authorization` header value.
pub fn parse_authorization(value: &str) -> AppResult<Credentials> {
    let (scheme, rest) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| AppError::Auth("Malformed Authorization header".to_string()))?;
    let rest = rest.trim();

    if scheme.eq_ignore_ascii_case("bearer") {
        if rest.is_empty() {
            return Err(AppError::Auth("Empty bearer token".to_string()));
        }
        return Ok(Credentials::Bearer(rest.to_string()));
    }

    if scheme.eq_ignore_ascii_case("basic") {
        let decoded = BASE64
            .decode(rest)
            .map_err(|_| AppError::Auth("Invalid basic credentials".to_string()))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| AppError::Auth("Invalid basic credentials".to_string()))?;
        let (email, password) = decoded
            .split_once(':')
            .ok_or_else(|| AppError::Auth("Invalid basic credentials".to_string()))?;
        return Ok(Credentials::Basic {
            email: email.to_string(),
            password: password.to_string(),
        });
    }

    Err(AppError::Auth(format!(
        "Unsupported authorization scheme '{}'",
        scheme
    )))
}

/// Resolve the caller and inject [`super::AuthUser`] into the request.
pub async fn require_auth(
    State(auth): State<AuthService>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let Some(header) = header else {
        tracing::debug!(path = %request.uri().path(), "No authorization header provided");
        return Err(AppError::Auth("Missing authentication token".to_string()));
    };

    let user = auth.resolve(parse_authorization(&header)?).await?;
    tracing::debug!(user_id = user.id, email = %user.email, "Request authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
