//! Backend de reservas de renta de vehículos
//!
//! Gestiona usuarios, vehículos y bookings con acceso por roles
//! (admin / customer). El núcleo es el motor del ciclo de vida del
//! booking: creación con chequeo de disponibilidad y precio congelado,
//! y transiciones active -> cancelled / returned coordinadas con la
//! disponibilidad del vehículo dentro de transacciones PostgreSQL.

pub mod config;
pub mod controllers;
pub mod database;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;
