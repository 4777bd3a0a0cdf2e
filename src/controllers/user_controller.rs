//! Controller de usuarios

use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::auth::AuthUser;
use crate::models::user::{UpdateUserRequest, UserResponse};
use crate::models::ApiResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<UserResponse>>, AppError> {
        let users = self.repository.list().await?;

        let message = if users.is_empty() {
            "No users found"
        } else {
            "Users retrieved successfully"
        };

        Ok(ApiResponse::success_with_message(
            users.into_iter().map(UserResponse::from).collect(),
            message.to_string(),
        ))
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        request: UpdateUserRequest,
        caller: AuthUser,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        if !caller.is_admin() && caller.id != user_id {
            return Err(AppError::Forbidden(
                "You can only update your own profile".to_string(),
            ));
        }

        if request.role.is_some() && !caller.is_admin() {
            return Err(AppError::Forbidden(
                "Only admin can change user roles".to_string(),
            ));
        }

        if let Some(ref email) = request.email {
            if self.repository.email_taken_by_other(email, user_id).await? {
                return Err(AppError::DuplicateKey(
                    "Email already exists for another user".to_string(),
                ));
            }
        }

        let password_hash = match request.password {
            Some(password) => Some(
                hash(&password, DEFAULT_COST)
                    .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?,
            ),
            None => None,
        };

        let user = self
            .repository
            .update(
                user_id,
                request.name,
                request.email,
                request.phone,
                request.role,
                password_hash,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "User updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, user_id: Uuid) -> Result<ApiResponse<UserResponse>, AppError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        // Bloqueado mientras el usuario tenga un booking activo
        if self.repository.has_active_bookings(user_id).await? {
            return Err(AppError::Conflict(
                "Cannot delete user with active bookings".to_string(),
            ));
        }

        self.repository.delete(user_id).await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "User deleted successfully".to_string(),
        ))
    }
}
