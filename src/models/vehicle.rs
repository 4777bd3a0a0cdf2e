//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus requests/responses.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// Disponibilidad del vehículo - mapea al ENUM availability_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "availability_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Booked,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Booked => "booked",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub vehicle_name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub registration_number: String,
    pub daily_rent_price: Decimal,
    pub availability_status: AvailabilityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear un nuevo vehículo (solo admin)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub vehicle_name: String,

    #[serde(rename = "type")]
    #[validate(length(min = 2, max = 50))]
    pub vehicle_type: String,

    #[validate(length(min = 3, max = 20))]
    pub registration_number: String,

    pub daily_rent_price: Decimal,

    pub availability_status: Option<AvailabilityStatus>,
}

/// Request para actualizar un vehículo existente (solo admin)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub vehicle_name: Option<String>,

    #[serde(rename = "type")]
    #[validate(length(min = 2, max = 50))]
    pub vehicle_type: Option<String>,

    #[validate(length(min = 3, max = 20))]
    pub registration_number: Option<String>,

    pub daily_rent_price: Option<Decimal>,

    pub availability_status: Option<AvailabilityStatus>,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub vehicle_name: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub registration_number: String,
    pub daily_rent_price: Decimal,
    pub availability_status: AvailabilityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            vehicle_name: vehicle.vehicle_name,
            vehicle_type: vehicle.vehicle_type,
            registration_number: vehicle.registration_number,
            daily_rent_price: vehicle.daily_rent_price,
            availability_status: vehicle.availability_status,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}
