//! User service.

use crate::auth::{AuthUser, PasswordHasher, Role};
use crate::db::models::{NewUser, UserCreateRequest, UserResponse, UserUpdateRequest};
use crate::error::{AppError, AppResult};
use crate::repository::SharedRepository;
use crate::validation;

/// Service for user operations.
#[derive(Clone)]
pub struct UserService {
    repo: SharedRepository,
    passwords: PasswordHasher,
}

impl UserService {
    /// Create a new user service.
    pub fn new(repo: SharedRepository, passwords: PasswordHasher) -> Self {
        Self { repo, passwords }
    }

    pub async fn list(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.repo.list_users().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64) -> AppResult<UserResponse> {
        self.repo
            .get_user(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("No user with id {}", id)))
    }

    /// Register a regular user.
    pub async fn create(&self, request: UserCreateRequest) -> AppResult<UserResponse> {
        let email = request.email.trim().to_string();
        validation::email(&email)?;
        validation::password(&request.password)?;

        let user = self
            .repo
            .insert_user(&NewUser {
                first_name: request.first_name,
                last_name: request.last_name,
                email,
                password_hash: self.passwords.hash(&request.password).await?,
                role: Role::User,
            })
            .await?;

        tracing::info!(user_id = user.id, email = %user.email, "User created");
        Ok(user.into())
    }

    /// Apply a partial update. Only the user themself or an administrator may do this.
    pub async fn update(
        &self,
        caller: &AuthUser,
        id: i64,
        request: UserUpdateRequest,
    ) -> AppResult<UserResponse> {
        caller.ensure_self_or_admin(id)?;

        let mut user = self
            .repo
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No user with id {}", id)))?;

        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = request.email {
            let email = email.trim().to_string();
            validation::email(&email)?;
            user.email = email;
        }
        if let Some(password) = request.password {
            validation::password(&password)?;
            user.password_hash = self.passwords.hash(&password).await?;
        }

        let user = self.repo.update_user(&user).await?;
        tracing::info!(user_id = user.id, by = caller.id, "User updated");
        Ok(user.into())
    }

    /// Delete a user who is not assigned to any task.
    pub async fn delete(&self, caller: &AuthUser, id: i64) -> AppResult<()> {
        caller.ensure_self_or_admin(id)?;

        if self.repo.user_has_tasks(id).await? {
            return Err(AppError::Conflict(format!(
                "User {} is assigned to a task and cannot be deleted",
                id
            )));
        }

        if self.repo.delete_user(id).await? {
            tracing::info!(user_id = id, by = caller.id, "User deleted");
        }
        Ok(())
    }
}
