//! Repositorio de vehículos

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::{AvailabilityStatus, Vehicle};
use crate::utils::errors::{map_unique_violation, AppError};

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        vehicle_name: String,
        vehicle_type: String,
        registration_number: String,
        daily_rent_price: Decimal,
        availability_status: AvailabilityStatus,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, vehicle_name, type, registration_number, daily_rent_price, availability_status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_name)
        .bind(vehicle_type)
        .bind(registration_number)
        .bind(daily_rent_price)
        .bind(availability_status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Vehicle with this registration number already exists"))?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(vehicles)
    }

    pub async fn registration_exists(
        &self,
        registration_number: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = match exclude_id {
            Some(id) => {
                sqlx::query_as(
                    "SELECT EXISTS(SELECT 1 FROM vehicles WHERE registration_number = $1 AND id != $2)",
                )
                .bind(registration_number)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(
                    "SELECT EXISTS(SELECT 1 FROM vehicles WHERE registration_number = $1)",
                )
                .bind(registration_number)
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        vehicle_name: Option<String>,
        vehicle_type: Option<String>,
        registration_number: Option<String>,
        daily_rent_price: Option<Decimal>,
        availability_status: Option<AvailabilityStatus>,
    ) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET vehicle_name = $2, type = $3, registration_number = $4,
                daily_rent_price = $5, availability_status = $6, updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vehicle_name.unwrap_or(current.vehicle_name))
        .bind(vehicle_type.unwrap_or(current.vehicle_type))
        .bind(registration_number.unwrap_or(current.registration_number))
        .bind(daily_rent_price.unwrap_or(current.daily_rent_price))
        .bind(availability_status.unwrap_or(current.availability_status))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Registration number already exists for another vehicle"))?;

        Ok(vehicle)
    }

    pub async fn has_active_bookings(&self, vehicle_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE vehicle_id = $1 AND status = 'active')",
        )
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
