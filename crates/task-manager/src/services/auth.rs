//! Authentication service: login and request credential resolution.

use crate::auth::middleware::Credentials;
use crate::auth::{AuthUser, LoginRequest, PasswordHasher, TokenIssuer};
use crate::db::models::User;
use crate::error::{AppError, AppResult};
use crate::repository::SharedRepository;

/// Service for authentication operations.
#[derive(Clone)]
pub struct AuthService {
    repo: SharedRepository,
    passwords: PasswordHasher,
    tokens: TokenIssuer,
}

impl AuthService {
    /// Create a new authentication service.
    pub fn new(repo: SharedRepository, passwords: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            repo,
            passwords,
            tokens,
        }
    }

    /// Check credentials and issue an access token.
    pub async fn login(&self, request: LoginRequest) -> AppResult<String> {
        let user = self
            .authenticate(request.username.trim(), &request.password)
            .await?;
        let token = self.tokens.issue(&user)?;

        tracing::info!(user_id = user.id, email = %user.email, "User logged in");
        Ok(token)
    }

    /// Look up a user by email and verify the password.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let invalid = || AppError::Auth("Invalid email or password".to_string());

        let user = self
            .repo
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| {
                tracing::warn!(email = %email, "Login attempt for unknown email");
                invalid()
            })?;

        if !self.passwords.verify(password, &user.password_hash).await? {
            tracing::warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(invalid());
        }

        Ok(user)
    }

    /// Turn request credentials into the calling user.
    pub async fn resolve(&self, credentials: Credentials) -> AppResult<AuthUser> {
        match credentials {
            Credentials::Bearer(token) => Ok(self.tokens.verify(&token)?.into()),
            Credentials::Basic { email, password } => {
                let user = self.authenticate(&email, &password).await?;
                Ok(AuthUser {
                    id: user.id,
                    role: user.role(),
                    email: user.email,
                })
            }
        }
    }
}
