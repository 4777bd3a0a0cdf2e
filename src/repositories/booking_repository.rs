//! Repositorio de bookings
//!
//! Las operaciones que mutan booking + vehículo a la vez corren dentro
//! de una sola transacción: o se escriben ambas filas o ninguna.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::{
    AdminBookingRow, Booking, BookingStatus, BookingVehicleRow, CustomerBookingRow,
};
use crate::models::vehicle::AvailabilityStatus;
use crate::utils::errors::AppError;

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear un booking activo y marcar el vehículo como 'booked',
    /// atómicamente.
    ///
    /// El flip de disponibilidad es un update condicional: cero filas
    /// afectadas significa que otro request ganó la carrera (o el vehículo
    /// ya estaba reservado) y se responde el conflicto de disponibilidad.
    pub async fn create(
        &self,
        customer_id: Uuid,
        vehicle_id: Uuid,
        rent_start_date: NaiveDate,
        rent_end_date: NaiveDate,
        total_price: Decimal,
    ) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE vehicles
            SET availability_status = 'booked', updated_at = NOW()
            WHERE id = $1 AND availability_status = 'available'
            "#,
        )
        .bind(vehicle_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::Conflict(
                "Vehicle is not available for booking".to_string(),
            ));
        }

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (id, customer_id, vehicle_id, rent_start_date, rent_end_date, total_price, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, 'active', NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(customer_id)
        .bind(vehicle_id)
        .bind(rent_start_date)
        .bind(rent_end_date)
        .bind(total_price)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(booking)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    /// Booking con el resumen del vehículo (nombre y tarifa) para la
    /// respuesta de creación. Se re-lee con join, el booking no persiste
    /// campos del vehículo.
    pub async fn fetch_with_vehicle(&self, id: Uuid) -> Result<BookingVehicleRow, AppError> {
        let row = sqlx::query_as::<_, BookingVehicleRow>(
            r#"
            SELECT b.id, b.customer_id, b.vehicle_id, b.rent_start_date, b.rent_end_date,
                   b.total_price, b.status, b.created_at, b.updated_at,
                   v.vehicle_name, v.daily_rent_price
            FROM bookings b
            JOIN vehicles v ON b.vehicle_id = v.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        Ok(row)
    }

    pub async fn list_all(&self) -> Result<Vec<AdminBookingRow>, AppError> {
        let rows = sqlx::query_as::<_, AdminBookingRow>(
            r#"
            SELECT b.id, b.customer_id, b.vehicle_id, b.rent_start_date, b.rent_end_date,
                   b.total_price, b.status, b.created_at, b.updated_at,
                   u.name AS customer_name, u.email AS customer_email,
                   v.vehicle_name, v.registration_number
            FROM bookings b
            JOIN users u ON b.customer_id = u.id
            JOIN vehicles v ON b.vehicle_id = v.id
            ORDER BY b.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<CustomerBookingRow>, AppError> {
        let rows = sqlx::query_as::<_, CustomerBookingRow>(
            r#"
            SELECT b.id, b.vehicle_id, b.rent_start_date, b.rent_end_date,
                   b.total_price, b.status, b.created_at,
                   v.vehicle_name, v.registration_number, v.type AS vehicle_type
            FROM bookings b
            JOIN vehicles v ON b.vehicle_id = v.id
            WHERE b.customer_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Transicionar el estado del booking y liberar el vehículo,
    /// atómicamente. Tanto cancelar como marcar devuelto dejan el
    /// vehículo en 'available'.
    pub async fn update_status(
        &self,
        booking_id: Uuid,
        vehicle_id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(status)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE vehicles
            SET availability_status = 'available', updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(vehicle_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(booking)
    }

    /// Lectura fresca de la disponibilidad del vehículo tras una transición
    pub async fn vehicle_availability(
        &self,
        vehicle_id: Uuid,
    ) -> Result<AvailabilityStatus, AppError> {
        let result: (AvailabilityStatus,) =
            sqlx::query_as("SELECT availability_status FROM vehicles WHERE id = $1")
                .bind(vehicle_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }
}
