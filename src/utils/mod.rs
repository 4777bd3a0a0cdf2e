//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT y cálculo de precios.

pub mod errors;
pub mod jwt;
pub mod pricing;
pub mod validation;
