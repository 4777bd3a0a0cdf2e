//! Repositorios de acceso a datos
//!
//! Gateway de persistencia sobre PostgreSQL. El estado de las entidades
//! nunca se cachea entre llamadas: cada operación re-lee el estado actual.

pub mod booking_repository;
pub mod user_repository;
pub mod vehicle_repository;
