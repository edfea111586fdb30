//! Authentication and authorization.
//!
//! Access tokens are HS256 JWTs issued by `POST /api/login`. Every other
//! `/api` route goes through [`middleware::require_auth`], which places an
//! [`AuthUser`] in the request extensions for handlers to check.

pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

pub use middleware::require_auth;
pub use password::PasswordHasher;
pub use token::{Claims, TokenIssuer};

/// Authority granted to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_USER")]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ROLE_ADMIN",
            Role::User => "ROLE_USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_ADMIN" | "ADMIN" => Ok(Role::Admin),
            "ROLE_USER" | "USER" => Ok(Role::User),
            other => Err(AppError::Validation(format!("Unknown role '{}'", other))),
        }
    }
}

/// Login request body. Clients send the email as `username`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "email")]
    pub username: String,
    pub password: String,
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn ensure_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Administrator role required".to_string()))
        }
    }

    /// Users may modify their own account; administrators may modify any.
    pub fn ensure_self_or_admin(&self, user_id: i64) -> AppResult<()> {
        if self.id == user_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "User {} cannot modify user {}",
                self.id, user_id
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(id: i64, role: Role) -> AuthUser {
        AuthUser {
            id,
            email: format!("user{}@example.com", id),
            role,
        }
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!("ROLE_ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::User.to_string(), "ROLE_USER");
        assert!("ROLE_ROOT".parse::<Role>().is_err());
    }

    #[test]
    fn test_self_or_admin() {
        assert!(caller(2, Role::User).ensure_self_or_admin(2).is_ok());
        assert!(caller(1, Role::Admin).ensure_self_or_admin(2).is_ok());
        assert!(matches!(
            caller(3, Role::User).ensure_self_or_admin(2),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_ensure_admin() {
        assert!(caller(1, Role::Admin).ensure_admin().is_ok());
        assert!(caller(2, Role::User).ensure_admin().is_err());
    }
}
