//! Progressive (bracket-based) rate schedule evaluation.
//!
//! The schedule walks the brackets in ascending order, taking from the base
//! at most each bracket's width. The table itself is assumed valid; see
//! [`crate::config::validate_brackets`].

use rust_decimal::Decimal;

use crate::config::TaxBracket;
use crate::models::BracketAmount;

use super::money::round_currency;

/// Evaluates a progressive schedule over a base amount.
///
/// Returns one [`BracketAmount`] per bracket, in table order. Each amount is
/// `portion × rate` rounded half-up to cents. A zero or negative base yields
/// zero for every bracket.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::evaluate_schedule;
/// use payroll_engine::config::TaxBracket;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let brackets = vec![
///     TaxBracket::bounded(dec("0"), dec("9000"), dec("0.15")),
///     TaxBracket::bounded(dec("9000"), dec("21000"), dec("0.25")),
///     TaxBracket::unbounded(dec("21000"), dec("0.40")),
/// ];
///
/// let amounts = evaluate_schedule(dec("50000"), &brackets);
/// assert_eq!(amounts[0].amount, dec("1350.00"));
/// assert_eq!(amounts[1].amount, dec("3000.00"));
/// assert_eq!(amounts[2].amount, dec("11600.00"));
/// ```
pub fn evaluate_schedule(base: Decimal, brackets: &[TaxBracket]) -> Vec<BracketAmount> {
    let mut remaining = base.max(Decimal::ZERO);

    brackets
        .iter()
        .map(|bracket| {
            let portion = match bracket.width() {
                Some(width) => remaining.min(width),
                None => remaining,
            };
            remaining = match bracket.width() {
                Some(width) => (remaining - width).max(Decimal::ZERO),
                None => Decimal::ZERO,
            };

            BracketAmount {
                lower_bound: bracket.lower_bound,
                upper_bound: bracket.upper_bound,
                rate: bracket.rate,
                portion,
                amount: round_currency(portion * bracket.rate),
            }
        })
        .collect()
}
