//! Controllers de la aplicación
//!
//! Contienen las reglas de negocio; los handlers de rutas solo traducen
//! request/response y delegan aquí.

pub mod auth_controller;
pub mod booking_controller;
pub mod user_controller;
pub mod vehicle_controller;
