// Utilitários para manipulação de valores monetários

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("amount must be a finite number")]
    NotFinite,
    #[error("amount must not be negative")]
    Negative,
    #[error("amount is too large to represent in minor units")]
    OutOfRange,
}

/// Converts a major-unit amount (e.g. 19.90) to integer minor units (1990),
/// rounding half away from zero. Must be called exactly once per order;
/// downstream code only ever sees minor units.
pub fn to_minor_units(amount: f64) -> Result<u64, MoneyError> {
    if !amount.is_finite() {
        return Err(MoneyError::NotFinite);
    }
    if amount < 0.0 {
        return Err(MoneyError::Negative);
    }
    let minor = (amount * 100.0).round();
    if minor > u64::MAX as f64 {
        return Err(MoneyError::OutOfRange);
    }
    Ok(minor as u64)
}

/// Display form of a minor-unit amount, fixed to two decimal places.
pub fn format_major_units(amount_minor: u64) -> String {
    format!("{}.{:02}", amount_minor / 100, amount_minor % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_to_minor_units() {
        assert_eq!(to_minor_units(19.90), Ok(1990)); // R$ 19,90
        assert_eq!(to_minor_units(0.0), Ok(0));
        assert_eq!(to_minor_units(10.0), Ok(1000));
        assert_eq!(to_minor_units(25.50), Ok(2550));
    }

    #[test]
    fn test_to_minor_units_rounds_half_up() {
        // dyadic fractions keep the tie exact in f64
        assert_eq!(to_minor_units(0.125), Ok(13));
        assert_eq!(to_minor_units(0.375), Ok(38));
        assert_eq!(to_minor_units(1.625), Ok(163));
    }

    #[test]
    fn test_to_minor_units_rejects_bad_input() {
        assert_eq!(to_minor_units(-0.01), Err(MoneyError::Negative));
        assert_eq!(to_minor_units(f64::NAN), Err(MoneyError::NotFinite));
        assert_eq!(to_minor_units(f64::INFINITY), Err(MoneyError::NotFinite));
    }

    #[test]
    fn test_format_major_units() {
        assert_eq!(format_major_units(1990), "19.90");
        assert_eq!(format_major_units(2550), "25.50");
        assert_eq!(format_major_units(5), "0.05");
        assert_eq!(format_major_units(100), "1.00");
    }

    proptest! {
        // Any amount with at most two fractional digits converts exactly and
        // round-trips through the display form.
        #[test]
        fn conversion_is_exact_for_two_decimal_amounts(minor in 0u64..1_000_000_000_000) {
            let major = minor as f64 / 100.0;
            prop_assert_eq!(to_minor_units(major), Ok(minor));

            let formatted = format_major_units(minor);
            let reparsed: f64 = formatted.parse().unwrap();
            prop_assert_eq!(to_minor_units(reparsed), Ok(minor));
        }
    }
}
