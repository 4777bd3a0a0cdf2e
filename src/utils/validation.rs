//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! que complementan los derives de `validator` en los requests.

use chrono::NaiveDate;
use validator::ValidationError;

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de email
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !value.contains('@') || !value.contains('.') {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo (tarifas de renta)
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + serde::Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de número de registro de vehículo
pub fn validate_registration_number(value: &str) -> Result<(), ValidationError> {
    let clean = value.replace([' ', '-', '_'], "");
    if clean.len() < 3 || clean.len() > 20 {
        let mut error = ValidationError::new("registration_number");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-15").is_ok());
        assert!(validate_date("2024/01/15").is_err());
        assert!(validate_date("15-01-2024").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Toyota Axio").is_ok());
        assert!(validate_not_empty("   ").is_err());
        assert!(validate_not_empty("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("test@").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(Decimal::from(50)).is_ok());
        assert!(validate_positive(Decimal::ZERO).is_err());
        assert!(validate_positive(Decimal::from(-10)).is_err());
    }

    #[test]
    fn test_validate_registration_number() {
        assert!(validate_registration_number("DHK-1234").is_ok());
        assert!(validate_registration_number("AB").is_err());
        assert!(validate_registration_number(&"A".repeat(30)).is_err());
    }
}
