//! Calculadora de precios de renta
//!
//! Función pura: (tarifa diaria, fecha inicio, fecha fin) -> precio total.
//! El precio se congela al crear el booking y nunca se recalcula.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::utils::errors::AppError;

/// Calcular el precio total de una renta.
///
/// `rent_end_date` debe ser estrictamente posterior a `rent_start_date`.
/// Total = días completos entre las fechas × tarifa diaria, redondeado
/// a 2 decimales (precisión de moneda).
pub fn calculate_total_price(
    daily_rent_price: Decimal,
    rent_start_date: NaiveDate,
    rent_end_date: NaiveDate,
) -> Result<Decimal, AppError> {
    if rent_end_date <= rent_start_date {
        return Err(AppError::InvalidDateRange);
    }

    let days = (rent_end_date - rent_start_date).num_days();
    Ok((Decimal::from(days) * daily_rent_price).round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_three_days_at_100() {
        let total = calculate_total_price(
            Decimal::from(100),
            date(2024, 1, 1),
            date(2024, 1, 4),
        )
        .unwrap();
        assert_eq!(total, Decimal::from(300));
    }

    #[test]
    fn test_single_day() {
        let total = calculate_total_price(
            Decimal::from(50),
            date(2024, 1, 1),
            date(2024, 1, 2),
        )
        .unwrap();
        assert_eq!(total, Decimal::from(50));
    }

    #[test]
    fn test_fractional_rate_rounds_to_currency_precision() {
        let rate = Decimal::new(3333, 2); // 33.33
        let total = calculate_total_price(rate, date(2024, 1, 1), date(2024, 1, 4)).unwrap();
        assert_eq!(total, Decimal::new(9999, 2)); // 99.99
    }

    #[test]
    fn test_equal_dates_rejected() {
        let err = calculate_total_price(
            Decimal::from(100),
            date(2024, 1, 1),
            date(2024, 1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidDateRange));
    }

    #[test]
    fn test_inverted_dates_rejected() {
        let err = calculate_total_price(
            Decimal::from(100),
            date(2024, 1, 4),
            date(2024, 1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidDateRange));
    }

    #[test]
    fn test_spans_month_boundary() {
        let total = calculate_total_price(
            Decimal::from(10),
            date(2024, 1, 30),
            date(2024, 2, 2),
        )
        .unwrap();
        assert_eq!(total, Decimal::from(30));
    }
}
