//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas. Los errores de
//! reglas de negocio nunca se comparan por substring: cada variante
//! mapea directamente a un status code estable.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("rent_end_date must be after rent_start_date")]
    InvalidDateRange,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(message: String, code: &str) -> Self {
        Self {
            success: false,
            message,
            code: Some(code.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "An error occurred while accessing the database".to_string(),
                        "DB_ERROR",
                    ),
                )
            }

            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(e.to_string(), "VALIDATION_ERROR"),
                )
            }

            AppError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(
                    format!("Missing required field: {}", field),
                    "MISSING_FIELD",
                ),
            ),

            AppError::InvalidDateRange => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(
                    "rent_end_date must be after rent_start_date".to_string(),
                    "INVALID_DATE_RANGE",
                ),
            ),

            AppError::Unauthorized(msg) => {
                warn!("Unauthorized access: {}", msg);
                (StatusCode::UNAUTHORIZED, ErrorResponse::new(msg, "UNAUTHORIZED"))
            }

            AppError::Forbidden(msg) => {
                warn!("Forbidden access: {}", msg);
                (StatusCode::FORBIDDEN, ErrorResponse::new(msg, "FORBIDDEN"))
            }

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(msg, "NOT_FOUND"),
            ),

            // Violaciones de reglas de negocio (vehículo no disponible,
            // cancelación fuera de plazo) responden 400 como en el API original.
            AppError::Conflict(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(msg, "CONFLICT"),
            ),

            AppError::DuplicateKey(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse::new(msg, "DUPLICATE_KEY"),
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(msg, "BAD_REQUEST"),
            ),

            AppError::Jwt(msg) => {
                warn!("JWT error: {}", msg);
                (StatusCode::UNAUTHORIZED, ErrorResponse::new(msg, "JWT_ERROR"))
            }

            AppError::Hash(msg) => {
                error!("Hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "An error occurred while processing credentials".to_string(),
                        "HASH_ERROR",
                    ),
                )
            }

            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "An unexpected error occurred".to_string(),
                        "INTERNAL_ERROR",
                    ),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Convertir violaciones de unicidad de PostgreSQL en `DuplicateKey`.
///
/// Las inserciones de users/vehicles verifican duplicados antes de escribir,
/// pero el constraint UNIQUE sigue siendo la última línea bajo concurrencia.
pub fn map_unique_violation(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::DuplicateKey(message.to_string())
        }
        _ => AppError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(status_of(AppError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::Conflict("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::InvalidDateRange), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::MissingField("vehicle_id".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::Forbidden("x".into())), StatusCode::FORBIDDEN);
        assert_eq!(status_of(AppError::Unauthorized("x".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::Jwt("x".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::DuplicateKey("x".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(AppError::Internal("x".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
