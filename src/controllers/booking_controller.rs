//! Controller de bookings: el motor del ciclo de vida
//!
//! Orquesta la creación y las transiciones de estado coordinando las
//! entidades Booking y Vehicle. Reglas:
//! - crear: vehículo existente y disponible, customer existente,
//!   `rent_end_date > rent_start_date`, precio congelado al crear.
//! - customer solo puede cancelar su propio booking y antes de la fecha
//!   de inicio; admin solo puede marcar como devuelto.
//! Toda mutación de dos entidades corre en una transacción del repositorio.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::models::booking::{
    AdminBookingView, Booking, BookingCreatedResponse, BookingListResponse, BookingStatus,
    BookingUpdatedResponse, CreateBookingRequest, CustomerBookingView, UpdateBookingStatusRequest,
    VehicleAvailabilitySummary,
};
use crate::models::user::UserRole;
use crate::models::vehicle::AvailabilityStatus;
use crate::models::ApiResponse;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::pricing::calculate_total_price;
use sqlx::PgPool;

pub struct BookingController {
    bookings: BookingRepository,
    vehicles: VehicleRepository,
    users: UserRepository,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bookings: BookingRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateBookingRequest,
        caller: AuthUser,
    ) -> Result<ApiResponse<BookingCreatedResponse>, AppError> {
        // Un customer solo puede reservar para sí mismo
        let customer_id = match caller.role {
            UserRole::Customer => caller.id,
            UserRole::Admin => request
                .customer_id
                .ok_or_else(|| AppError::MissingField("customer_id".to_string()))?,
        };

        let vehicle_id = request
            .vehicle_id
            .ok_or_else(|| AppError::MissingField("vehicle_id".to_string()))?;
        let rent_start_date = request
            .rent_start_date
            .ok_or_else(|| AppError::MissingField("rent_start_date".to_string()))?;
        let rent_end_date = request
            .rent_end_date
            .ok_or_else(|| AppError::MissingField("rent_end_date".to_string()))?;

        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if vehicle.availability_status != AvailabilityStatus::Available {
            return Err(AppError::Conflict(
                "Vehicle is not available for booking".to_string(),
            ));
        }

        self.users
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        let total_price =
            calculate_total_price(vehicle.daily_rent_price, rent_start_date, rent_end_date)?;

        // Inserción + flip de disponibilidad en una sola transacción.
        // El chequeo de disponibilidad de arriba es solo para responder
        // temprano: la garantía real es el update condicional del repo.
        let booking = self
            .bookings
            .create(customer_id, vehicle_id, rent_start_date, rent_end_date, total_price)
            .await?;

        let row = self.bookings.fetch_with_vehicle(booking.id).await?;

        Ok(ApiResponse::success_with_message(
            row.into(),
            "Booking created successfully".to_string(),
        ))
    }

    pub async fn list(&self, caller: AuthUser) -> Result<BookingListResponse, AppError> {
        match caller.role {
            UserRole::Admin => {
                let rows = self.bookings.list_all().await?;
                Ok(BookingListResponse::Admin(
                    rows.into_iter().map(AdminBookingView::from).collect(),
                ))
            }
            UserRole::Customer => {
                let rows = self.bookings.list_for_customer(caller.id).await?;
                Ok(BookingListResponse::Customer(
                    rows.into_iter().map(CustomerBookingView::from).collect(),
                ))
            }
        }
    }

    pub async fn update_status(
        &self,
        booking_id: Uuid,
        request: UpdateBookingStatusRequest,
        caller: AuthUser,
    ) -> Result<ApiResponse<BookingUpdatedResponse>, AppError> {
        let requested: BookingStatus = request
            .status
            .parse()
            .map_err(AppError::BadRequest)?;

        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        let today = Utc::now().date_naive();
        authorize_transition(&booking, requested, &caller, today)?;

        let updated = self
            .bookings
            .update_status(booking_id, booking.vehicle_id, requested)
            .await?;

        let availability = self.bookings.vehicle_availability(updated.vehicle_id).await?;

        let message = match requested {
            BookingStatus::Returned => {
                "Booking marked as returned. Vehicle is now available".to_string()
            }
            BookingStatus::Cancelled => "Booking cancelled successfully".to_string(),
            BookingStatus::Active => "Booking updated successfully".to_string(),
        };

        Ok(ApiResponse::success_with_message(
            BookingUpdatedResponse {
                booking: updated,
                vehicle: VehicleAvailabilitySummary {
                    availability_status: availability,
                },
            },
            message,
        ))
    }
}

/// Guardas de la máquina de estados del booking.
///
/// Customer: solo `cancelled`, solo su propio booking, solo antes de la
/// fecha de inicio. Admin: solo `returned`, sin guarda sobre el estado
/// actual (el API original permite re-marcar un booking terminal;
/// pendiente de definición de producto).
fn authorize_transition(
    booking: &Booking,
    requested: BookingStatus,
    caller: &AuthUser,
    today: NaiveDate,
) -> Result<(), AppError> {
    match caller.role {
        UserRole::Customer => {
            if requested != BookingStatus::Cancelled {
                return Err(AppError::Forbidden(
                    "Customers may only cancel bookings".to_string(),
                ));
            }
            if booking.customer_id != caller.id {
                return Err(AppError::Forbidden(
                    "You can only cancel your own bookings".to_string(),
                ));
            }
            if today >= booking.rent_start_date {
                return Err(AppError::Conflict(
                    "Booking cannot be cancelled after start date".to_string(),
                ));
            }
            Ok(())
        }
        UserRole::Admin => {
            if requested != BookingStatus::Returned {
                return Err(AppError::Forbidden(
                    "Admins may only mark bookings as returned".to_string(),
                ));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(customer_id: Uuid, start: NaiveDate) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            customer_id,
            vehicle_id: Uuid::new_v4(),
            rent_start_date: start,
            rent_end_date: start + chrono::Duration::days(3),
            total_price: Decimal::from(150),
            status: BookingStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn customer(id: Uuid) -> AuthUser {
        AuthUser {
            id,
            role: UserRole::Customer,
        }
    }

    fn admin() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            role: UserRole::Admin,
        }
    }

    #[test]
    fn test_customer_cancels_own_booking_before_start() {
        let customer_id = Uuid::new_v4();
        let b = booking(customer_id, date(2024, 1, 1));

        let result = authorize_transition(
            &b,
            BookingStatus::Cancelled,
            &customer(customer_id),
            date(2023, 12, 30),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_customer_cannot_cancel_after_start() {
        let customer_id = Uuid::new_v4();
        let b = booking(customer_id, date(2024, 1, 1));

        let err = authorize_transition(
            &b,
            BookingStatus::Cancelled,
            &customer(customer_id),
            date(2024, 1, 2),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_customer_cannot_cancel_on_start_date() {
        let customer_id = Uuid::new_v4();
        let b = booking(customer_id, date(2024, 1, 1));

        let err = authorize_transition(
            &b,
            BookingStatus::Cancelled,
            &customer(customer_id),
            date(2024, 1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_customer_cannot_cancel_someone_elses_booking() {
        let b = booking(Uuid::new_v4(), date(2024, 1, 1));

        let err = authorize_transition(
            &b,
            BookingStatus::Cancelled,
            &customer(Uuid::new_v4()),
            date(2023, 12, 30),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_customer_cannot_mark_returned() {
        let customer_id = Uuid::new_v4();
        let b = booking(customer_id, date(2024, 1, 1));

        let err = authorize_transition(
            &b,
            BookingStatus::Returned,
            &customer(customer_id),
            date(2023, 12, 30),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_admin_marks_returned_any_time() {
        let b = booking(Uuid::new_v4(), date(2024, 1, 1));

        assert!(authorize_transition(&b, BookingStatus::Returned, &admin(), date(2023, 12, 1)).is_ok());
        assert!(authorize_transition(&b, BookingStatus::Returned, &admin(), date(2024, 6, 1)).is_ok());
    }

    #[test]
    fn test_admin_cannot_cancel() {
        let b = booking(Uuid::new_v4(), date(2024, 1, 1));

        let err = authorize_transition(&b, BookingStatus::Cancelled, &admin(), date(2023, 12, 1))
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_admin_can_return_terminal_booking() {
        // comportamiento permisivo heredado del API original
        let mut b = booking(Uuid::new_v4(), date(2024, 1, 1));
        b.status = BookingStatus::Cancelled;

        assert!(authorize_transition(&b, BookingStatus::Returned, &admin(), date(2024, 2, 1)).is_ok());
    }
}
