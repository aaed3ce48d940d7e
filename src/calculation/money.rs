//! Currency rounding and guarded arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept on currency amounts.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount half-up (away from zero on ties) to cents.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("0.125").unwrap()), Decimal::from_str("0.13").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("0.124").unwrap()), Decimal::from_str("0.12").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        CURRENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Divides `numerator` by `denominator`, returning zero when the divisor is zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::safe_div;
/// use rust_decimal::Decimal;
///
/// assert_eq!(safe_div(Decimal::TEN, Decimal::ZERO), Decimal::ZERO);
/// assert_eq!(safe_div(Decimal::TEN, Decimal::TWO), Decimal::new(5, 0));
/// ```
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_half_up_on_exact_midpoint() {
        assert_eq!(round_currency(dec("6666.665")), dec("6666.67"));
        assert_eq!(round_currency(dec("0.005")), dec("0.01"));
    }

    #[test]
    fn test_round_keeps_two_decimals() {
        assert_eq!(round_currency(dec("150")).to_string(), "150");
        assert_eq!(round_currency(dec("150.000")).to_string(), "150.00");
        assert_eq!(round_currency(dec("1350.0000")), dec("1350.00"));
    }

    #[test]
    fn test_round_negative_midpoint_goes_away_from_zero() {
        assert_eq!(round_currency(dec("-0.125")), dec("-0.13"));
    }

    #[test]
    fn test_safe_div_by_zero_is_zero() {
        assert_eq!(safe_div(dec("100"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_safe_div_regular_division() {
        assert_eq!(safe_div(dec("45000"), dec("30")), dec("1500"));
    }
}
