//! Modelo de Booking
//!
//! Este módulo contiene el struct Booking, la máquina de estados del
//! ciclo de vida y las vistas con joins de customer/vehicle.
//!
//! Estados: `active -> cancelled` (customer, antes de la fecha de inicio)
//! y `active -> returned` (admin). `cancelled` y `returned` son terminales.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Estado del booking - mapea al ENUM booking_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Active,
    Cancelled,
    Returned,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Active => "active",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Returned => "returned",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(BookingStatus::Active),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "returned" => Ok(BookingStatus::Returned),
            other => Err(format!("Invalid booking status \"{}\"", other)),
        }
    }
}

/// Booking principal - mapea exactamente a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request para crear un booking.
///
/// Todos los campos llegan como Option para poder responder
/// `MissingField` campo por campo en lugar de un error de parseo genérico.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub customer_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub rent_start_date: Option<NaiveDate>,
    pub rent_end_date: Option<NaiveDate>,
}

/// Request para actualizar el estado de un booking
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

/// Resumen de vehículo embebido en la respuesta de creación
#[derive(Debug, Serialize)]
pub struct VehiclePriceSummary {
    pub vehicle_name: String,
    pub daily_rent_price: Decimal,
}

/// Resumen de vehículo embebido en los listados
#[derive(Debug, Serialize)]
pub struct VehicleSummary {
    pub vehicle_name: String,
    pub registration_number: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
}

/// Resumen de customer embebido en el listado de admin
#[derive(Debug, Serialize)]
pub struct CustomerSummary {
    pub name: String,
    pub email: String,
}

/// Booking recién creado, con el resumen del vehículo al momento de crear
#[derive(Debug, Serialize)]
pub struct BookingCreatedResponse {
    #[serde(flatten)]
    pub booking: Booking,
    pub vehicle: VehiclePriceSummary,
}

/// Fila del join bookings ⋈ vehicles para la respuesta de creación
#[derive(Debug, FromRow)]
pub struct BookingVehicleRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub vehicle_name: String,
    pub daily_rent_price: Decimal,
}

impl From<BookingVehicleRow> for BookingCreatedResponse {
    fn from(row: BookingVehicleRow) -> Self {
        Self {
            booking: Booking {
                id: row.id,
                customer_id: row.customer_id,
                vehicle_id: row.vehicle_id,
                rent_start_date: row.rent_start_date,
                rent_end_date: row.rent_end_date,
                total_price: row.total_price,
                status: row.status,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            vehicle: VehiclePriceSummary {
                vehicle_name: row.vehicle_name,
                daily_rent_price: row.daily_rent_price,
            },
        }
    }
}

/// Fila del join para el listado de admin (customer + vehicle)
#[derive(Debug, FromRow)]
pub struct AdminBookingRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub vehicle_name: String,
    pub registration_number: String,
}

/// Vista de booking para el listado de admin
#[derive(Debug, Serialize)]
pub struct AdminBookingView {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer: CustomerSummary,
    pub vehicle: VehicleSummary,
}

impl From<AdminBookingRow> for AdminBookingView {
    fn from(row: AdminBookingRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            vehicle_id: row.vehicle_id,
            rent_start_date: row.rent_start_date,
            rent_end_date: row.rent_end_date,
            total_price: row.total_price,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            customer: CustomerSummary {
                name: row.customer_name,
                email: row.customer_email,
            },
            vehicle: VehicleSummary {
                vehicle_name: row.vehicle_name,
                registration_number: row.registration_number,
                vehicle_type: None,
            },
        }
    }
}

/// Fila del join para el listado de un customer
#[derive(Debug, FromRow)]
pub struct CustomerBookingRow {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub vehicle_name: String,
    pub registration_number: String,
    pub vehicle_type: String,
}

/// Vista de booking para el listado de un customer
#[derive(Debug, Serialize)]
pub struct CustomerBookingView {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub vehicle: VehicleSummary,
}

impl From<CustomerBookingRow> for CustomerBookingView {
    fn from(row: CustomerBookingRow) -> Self {
        Self {
            id: row.id,
            vehicle_id: row.vehicle_id,
            rent_start_date: row.rent_start_date,
            rent_end_date: row.rent_end_date,
            total_price: row.total_price,
            status: row.status,
            created_at: row.created_at,
            vehicle: VehicleSummary {
                vehicle_name: row.vehicle_name,
                registration_number: row.registration_number,
                vehicle_type: Some(row.vehicle_type),
            },
        }
    }
}

/// Resumen de disponibilidad incluido al actualizar el estado
#[derive(Debug, Serialize)]
pub struct VehicleAvailabilitySummary {
    pub availability_status: crate::models::vehicle::AvailabilityStatus,
}

/// Booking actualizado, con la disponibilidad resultante del vehículo
#[derive(Debug, Serialize)]
pub struct BookingUpdatedResponse {
    #[serde(flatten)]
    pub booking: Booking,
    pub vehicle: VehicleAvailabilitySummary,
}

/// Listado de bookings según el rol del caller
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BookingListResponse {
    Admin(Vec<AdminBookingView>),
    Customer(Vec<CustomerBookingView>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("active".parse::<BookingStatus>().unwrap(), BookingStatus::Active);
        assert_eq!("cancelled".parse::<BookingStatus>().unwrap(), BookingStatus::Cancelled);
        assert_eq!("returned".parse::<BookingStatus>().unwrap(), BookingStatus::Returned);
        assert!("done".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_created_response_flattens_booking_fields() {
        let row = BookingVehicleRow {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            rent_start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            rent_end_date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            total_price: Decimal::from(300),
            status: BookingStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            vehicle_name: "Toyota Axio".to_string(),
            daily_rent_price: Decimal::from(100),
        };

        let response = BookingCreatedResponse::from(row);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "active");
        assert_eq!(json["vehicle"]["vehicle_name"], "Toyota Axio");
        // los campos del booking quedan aplanados al nivel superior
        assert!(json.get("rent_start_date").is_some());
    }
}
