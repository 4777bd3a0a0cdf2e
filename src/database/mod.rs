//! Módulo de base de datos
//!
//! Maneja la conexión y el bootstrap del schema PostgreSQL.

pub mod connection;
pub mod schema;

pub use connection::create_pool;
pub use schema::init_schema;
