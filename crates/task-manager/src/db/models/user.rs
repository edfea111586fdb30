//! User database model.
//!
//! Users log in to the API and can be assigned to tasks. The password hash
//! never leaves the service layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::Role;

/// User row.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

impl User {
    /// Parsed role; unknown values are treated as a regular user.
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::User)
    }
}

/// Fields required to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Request to create a user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    pub email: String,

    pub password: String,
}

/// Partial update of a user. Absent fields are left untouched; `firstName`
/// and `lastName` may be cleared with an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub first_name: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub last_name: Option<Option<String>>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

/// User as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub created_at: NaiveDate,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let request: UserUpdateRequest =
            serde_json::from_str(r#"{"firstName": null, "email": "a@b.io"}"#).unwrap();
        assert_eq!(request.first_name, Some(None));
        assert_eq!(request.last_name, None);
        assert_eq!(request.email.as_deref(), Some("a@b.io"));
        assert!(request.password.is_none());
    }

    #[test]
    fn test_response_hides_password() {
        let user = User {
            id: 1,
            first_name: Some("Ada".into()),
            last_name: None,
            email: "ada@example.com".into(),
            password_hash: "$2b$04$hash".into(),
            role: "ROLE_USER".into(),
            created_at: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            updated_at: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["createdAt"], "2024-08-01");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
