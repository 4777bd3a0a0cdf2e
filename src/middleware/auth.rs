//! Middleware de autenticación
//!
//! Resuelve la identidad del caller `{id, role}` a partir del token
//! Bearer. Los handlers consumen `AuthUser` (cualquier rol autenticado)
//! o `AdminUser` (solo admin) como extractors de Axum.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::models::user::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Identidad autenticada del caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("You are not authorized!".to_string()))?;

        let token = extract_token_from_header(auth_header)?;
        let claims = verify_token(token, &JwtConfig::from(&state.config))?;

        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Jwt("Invalid token subject".to_string()))?;
        let role = claims
            .role
            .parse::<UserRole>()
            .map_err(AppError::Jwt)?;

        Ok(AuthUser { id, role })
    }
}

/// Caller autenticado con rol admin
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "You are not authorized to access this resource!".to_string(),
            ));
        }
        Ok(AdminUser(user))
    }
}
