//! Bootstrap del schema PostgreSQL
//!
//! Este módulo crea los tipos ENUM y las tablas al arrancar el proceso,
//! con statements idempotentes (IF NOT EXISTS / duplicate_object).

use sqlx::PgPool;

use crate::utils::errors::AppError;

const CREATE_USER_ROLE: &str = r#"
DO $$ BEGIN
    CREATE TYPE user_role AS ENUM ('admin', 'customer');
EXCEPTION WHEN duplicate_object THEN NULL;
END $$
"#;

const CREATE_AVAILABILITY_STATUS: &str = r#"
DO $$ BEGIN
    CREATE TYPE availability_status AS ENUM ('available', 'booked');
EXCEPTION WHEN duplicate_object THEN NULL;
END $$
"#;

const CREATE_BOOKING_STATUS: &str = r#"
DO $$ BEGIN
    CREATE TYPE booking_status AS ENUM ('active', 'cancelled', 'returned');
EXCEPTION WHEN duplicate_object THEN NULL;
END $$
"#;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(150) UNIQUE NOT NULL,
    phone VARCHAR(20),
    role user_role NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_VEHICLES: &str = r#"
CREATE TABLE IF NOT EXISTS vehicles (
    id UUID PRIMARY KEY,
    vehicle_name VARCHAR(100) NOT NULL,
    type VARCHAR(50) NOT NULL,
    registration_number VARCHAR(50) UNIQUE NOT NULL,
    daily_rent_price NUMERIC(10, 2) NOT NULL CHECK (daily_rent_price > 0),
    availability_status availability_status NOT NULL DEFAULT 'available',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_BOOKINGS: &str = r#"
CREATE TABLE IF NOT EXISTS bookings (
    id UUID PRIMARY KEY,
    customer_id UUID NOT NULL REFERENCES users(id),
    vehicle_id UUID NOT NULL REFERENCES vehicles(id),
    rent_start_date DATE NOT NULL,
    rent_end_date DATE NOT NULL CHECK (rent_end_date > rent_start_date),
    total_price NUMERIC(10, 2) NOT NULL,
    status booking_status NOT NULL DEFAULT 'active',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Inicializar el schema de la base de datos
pub async fn init_schema(pool: &PgPool) -> Result<(), AppError> {
    for statement in [
        CREATE_USER_ROLE,
        CREATE_AVAILABILITY_STATUS,
        CREATE_BOOKING_STATUS,
        CREATE_USERS,
        CREATE_VEHICLES,
        CREATE_BOOKINGS,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
