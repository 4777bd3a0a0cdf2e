//! Controller de autenticación (sign up / sign in)

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::models::user::{SignInRequest, SignInResponse, SignUpRequest, UserResponse, UserRole};
use crate::models::ApiResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    repository: UserRepository,
}

impl AuthController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn sign_up(
        &self,
        request: SignUpRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        let email = request.email.to_lowercase();
        let role = request.role.unwrap_or(UserRole::Customer);

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateKey("Email already exists".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let user = self
            .repository
            .create(request.name, email, request.phone, role, password_hash)
            .await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "User registered successfully".to_string(),
        ))
    }

    pub async fn sign_in(
        &self,
        request: SignInRequest,
        config: &EnvironmentConfig,
    ) -> Result<ApiResponse<SignInResponse>, AppError> {
        request.validate()?;

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        let matches = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !matches {
            return Err(AppError::Unauthorized("Invalid email or password".to_string()));
        }

        let token = generate_token(user.id, user.role.as_str(), &JwtConfig::from(config))?;

        Ok(ApiResponse::success_with_message(
            SignInResponse {
                token,
                user: user.into(),
            },
            "User logged in successfully".to_string(),
        ))
    }
}
