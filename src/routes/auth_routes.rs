use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::controllers::auth_controller::AuthController;
use crate::models::user::{SignInRequest, SignInResponse, SignUpRequest, UserResponse};
use crate::models::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
}

async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.sign_up(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<ApiResponse<SignInResponse>>, AppError> {
    let controller = AuthController::new(state.pool.clone());
    let response = controller.sign_in(request, &state.config).await?;
    Ok(Json(response))
}
