//! Middleware de la aplicación

pub mod auth;
pub mod cors;

pub use auth::{AdminUser, AuthUser};
