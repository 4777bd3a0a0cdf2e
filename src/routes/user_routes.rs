use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::user_controller::UserController;
use crate::middleware::auth::{AdminUser, AuthUser};
use crate::models::user::{UpdateUserRequest, UserResponse};
use crate::models::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:user_id", put(update_user))
        .route("/:user_id", delete(delete_user))
}

/// Solo admin puede listar todos los usuarios
async fn list_users(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

/// Un usuario actualiza su propio perfil; admin puede actualizar cualquiera
async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.update(user_id, request, user).await?;
    Ok(Json(response))
}

/// Solo admin puede eliminar usuarios
async fn delete_user(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.delete(user_id).await?;
    Ok(Json(response))
}
