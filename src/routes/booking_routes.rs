use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::middleware::auth::AuthUser;
use crate::models::booking::{
    BookingCreatedResponse, BookingListResponse, BookingUpdatedResponse, CreateBookingRequest,
    UpdateBookingStatusRequest,
};
use crate::models::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/", get(list_bookings))
        .route("/:booking_id", put(update_booking_status))
}

/// Customer o admin pueden crear bookings
async fn create_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingCreatedResponse>>), AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.create(request, user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Admin ve todos los bookings; customer solo los propios
async fn list_bookings(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<BookingListResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.list(user).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Bookings retrieved successfully".to_string(),
    )))
}

/// Cancelar (customer) o marcar como devuelto (admin)
async fn update_booking_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<ApiResponse<BookingUpdatedResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.update_status(booking_id, request, user).await?;
    Ok(Json(response))
}
