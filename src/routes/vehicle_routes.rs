use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::middleware::auth::AdminUser;
use crate::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::models::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/", post(create_vehicle))
        .route("/:vehicle_id", get(get_vehicle))
        .route("/:vehicle_id", put(update_vehicle))
        .route("/:vehicle_id", delete(delete_vehicle))
}

/// Listado público de vehículos
async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VehicleResponse>>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(vehicle_id).await?;
    Ok(Json(response))
}

/// Solo admin puede crear vehículos
async fn create_vehicle(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(vehicle_id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update(vehicle_id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.delete(vehicle_id).await?;
    Ok(Json(response))
}
