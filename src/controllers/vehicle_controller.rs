//! Controller de vehículos (CRUD, solo admin para mutaciones)

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::{
    AvailabilityStatus, CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse,
};
use crate::models::ApiResponse;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if request.daily_rent_price <= Decimal::ZERO {
            return Err(AppError::BadRequest(
                "daily_rent_price must be positive".to_string(),
            ));
        }

        if self
            .repository
            .registration_exists(&request.registration_number, None)
            .await?
        {
            return Err(AppError::DuplicateKey(
                "Vehicle with this registration number already exists".to_string(),
            ));
        }

        let vehicle = self
            .repository
            .create(
                request.vehicle_name,
                request.vehicle_type,
                request.registration_number,
                request.daily_rent_price,
                request
                    .availability_status
                    .unwrap_or(AvailabilityStatus::Available),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle created successfully".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<VehicleResponse>>, AppError> {
        let vehicles = self.repository.list().await?;

        Ok(ApiResponse::success_with_message(
            vehicles.into_iter().map(VehicleResponse::from).collect(),
            "Vehicles retrieved successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        Ok(ApiResponse::success(vehicle.into()))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if let Some(price) = request.daily_rent_price {
            if price <= Decimal::ZERO {
                return Err(AppError::BadRequest(
                    "daily_rent_price must be positive".to_string(),
                ));
            }
        }

        if let Some(ref registration) = request.registration_number {
            if self
                .repository
                .registration_exists(registration, Some(id))
                .await?
            {
                return Err(AppError::DuplicateKey(
                    "Registration number already exists for another vehicle".to_string(),
                ));
            }
        }

        let vehicle = self
            .repository
            .update(
                id,
                request.vehicle_name,
                request.vehicle_type,
                request.registration_number,
                request.daily_rent_price,
                request.availability_status,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        // Bloqueado mientras exista un booking activo sobre el vehículo
        if self.repository.has_active_bookings(id).await? {
            return Err(AppError::Conflict(
                "Cannot delete vehicle with active bookings".to_string(),
            ));
        }

        self.repository.delete(id).await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle deleted successfully".to_string(),
        ))
    }
}
