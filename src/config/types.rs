//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validation that
//! turns a malformed configuration into a fatal error before any computation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the payroll regime.
#[derive(Debug, Clone, Deserialize)]
pub struct RegimeMetadata {
    /// Short regime code (e.g., "MR").
    pub code: String,
    /// The human-readable name of the regime.
    pub name: String,
    /// The country the regime applies to.
    pub country: String,
    /// ISO 4217 currency code of all amounts (e.g., "MRU").
    pub currency: String,
}

/// One bracket of the income tax schedule.
///
/// `upper_bound` is `None` for the open top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the bracket.
    pub lower_bound: Decimal,
    /// Upper bound of the bracket, or `None` for infinity.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Rate applied to the portion of the base in this bracket, as a fraction.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Creates a bounded bracket.
    pub fn bounded(lower_bound: Decimal, upper_bound: Decimal, rate: Decimal) -> Self {
        Self {
            lower_bound,
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    /// Creates the open top bracket.
    pub fn unbounded(lower_bound: Decimal, rate: Decimal) -> Self {
        Self {
            lower_bound,
            upper_bound: None,
            rate,
        }
    }

    /// Width of the bracket, `None` when unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.upper_bound.map(|upper| upper - self.lower_bound)
    }
}

/// Checks that brackets cover `[0, ∞)` in ascending order without gaps or overlaps.
///
/// # Example
///
/// ```
/// use payroll_engine::config::{TaxBracket, validate_brackets};
/// use rust_decimal::Decimal;
///
/// let brackets = vec![
///     TaxBracket::bounded(Decimal::ZERO, Decimal::new(9000, 0), Decimal::new(15, 2)),
///     TaxBracket::unbounded(Decimal::new(9000, 0), Decimal::new(25, 2)),
/// ];
/// assert!(validate_brackets(&brackets).is_ok());
///
/// let gap = vec![
///     TaxBracket::bounded(Decimal::ZERO, Decimal::new(9000, 0), Decimal::new(15, 2)),
///     TaxBracket::unbounded(Decimal::new(10000, 0), Decimal::new(25, 2)),
/// ];
/// assert!(validate_brackets(&gap).is_err());
/// ```
pub fn validate_brackets(brackets: &[TaxBracket]) -> EngineResult<()> {
    let invalid = |message: String| Err(EngineError::InvalidBracketTable { message });

    let Some(first) = brackets.first() else {
        return invalid("table is empty".to_string());
    };
    if !first.lower_bound.is_zero() {
        return invalid(format!(
            "first bracket starts at {} instead of 0",
            first.lower_bound
        ));
    }

    let last_index = brackets.len() - 1;
    let mut expected_lower = Decimal::ZERO;
    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.lower_bound != expected_lower {
            let kind = if bracket.lower_bound > expected_lower {
                "gap"
            } else {
                "overlap"
            };
            return invalid(format!(
                "{} at bracket {}: expected lower bound {}, found {}",
                kind,
                index + 1,
                expected_lower,
                bracket.lower_bound
            ));
        }
        if bracket.rate.is_sign_negative() {
            return invalid(format!("bracket {} has a negative rate", index + 1));
        }
        match bracket.upper_bound {
            Some(upper) if upper <= bracket.lower_bound => {
                return invalid(format!(
                    "bracket {} upper bound {} is not above its lower bound {}",
                    index + 1,
                    upper,
                    bracket.lower_bound
                ));
            }
            Some(upper) if index == last_index => {
                return invalid(format!(
                    "last bracket is capped at {}; the table must extend to infinity",
                    upper
                ));
            }
            Some(upper) => expected_lower = upper,
            None if index != last_index => {
                return invalid(format!(
                    "bracket {} is unbounded but is not the last bracket",
                    index + 1
                ));
            }
            None => {}
        }
    }

    Ok(())
}

/// Ceiling and rates of one social contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRates {
    /// Cap on the contribution base; `None` means uncapped.
    #[serde(default)]
    pub ceiling: Option<Decimal>,
    /// Employee share rate, as a fraction.
    pub employee_rate: Decimal,
    /// Employer share rate, as a fraction.
    pub employer_rate: Decimal,
}

/// How benefits in kind are treated by the income tax base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitsInKindTaxation {
    /// Benefits in kind flagged for income tax stay in the tax base.
    #[default]
    Taxable,
    /// Benefits in kind are removed from the tax base before the schedule runs.
    Exempt,
}

/// Income tax (ITS) configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxConfig {
    /// Progressive brackets covering `[0, ∞)`.
    pub brackets: Vec<TaxBracket>,
    /// Flat amount removed from the base before the schedule runs.
    pub abatement: Decimal,
    /// Subtract the fund-A employee contribution from the tax base.
    pub deduct_fund_a_from_base: bool,
    /// Subtract the fund-B employee contribution from the tax base.
    pub deduct_fund_b_from_base: bool,
    /// Treatment of benefits in kind.
    #[serde(default)]
    pub benefits_in_kind: BenefitsInKindTaxation,
}

/// Miscellaneous payroll settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Days in a full month, used to prorate the base salary.
    pub standard_days_per_month: Decimal,
    /// Maximum share of net pay (0–100) seizable for loan and advance repayments.
    pub installment_quota_percentage: Decimal,
}

/// The complete rate configuration effective from a given date.
///
/// This is the value object passed explicitly into every calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfiguration {
    /// The first date these rates apply to.
    pub effective_date: NaiveDate,
    /// Fund-A (CNSS) rates; a ceiling is required.
    pub fund_a: ContributionRates,
    /// Fund-B (CNAM) rates; uncapped unless a ceiling is given.
    pub fund_b: ContributionRates,
    /// Income tax configuration.
    pub income_tax: IncomeTaxConfig,
    /// Payroll settings.
    pub payroll: PayrollSettings,
}

impl RateConfiguration {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidBracketTable` for gaps, overlaps or a bounded top bracket
    /// - `MissingConfigValue` when the fund-A ceiling is absent
    /// - `InvalidConfigValue` for negative rates, ceilings or abatement, a quota
    ///   outside 0–100, or non-positive standard days
    pub fn validate(&self) -> EngineResult<()> {
        if self.fund_a.ceiling.is_none() {
            return Err(EngineError::MissingConfigValue {
                field: "fund_a.ceiling".to_string(),
            });
        }
        validate_contribution("fund_a", &self.fund_a)?;
        validate_contribution("fund_b", &self.fund_b)?;

        validate_brackets(&self.income_tax.brackets)?;
        non_negative("income_tax.abatement", self.income_tax.abatement)?;

        if self.payroll.standard_days_per_month <= Decimal::ZERO {
            return Err(EngineError::InvalidConfigValue {
                field: "payroll.standard_days_per_month".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let quota = self.payroll.installment_quota_percentage;
        if quota < Decimal::ZERO || quota > Decimal::ONE_HUNDRED {
            return Err(EngineError::InvalidConfigValue {
                field: "payroll.installment_quota_percentage".to_string(),
                message: format!("must be between 0 and 100, found {}", quota),
            });
        }

        Ok(())
    }
}

fn validate_contribution(name: &str, rates: &ContributionRates) -> EngineResult<()> {
    if let Some(ceiling) = rates.ceiling {
        non_negative(&format!("{name}.ceiling"), ceiling)?;
    }
    non_negative(&format!("{name}.employee_rate"), rates.employee_rate)?;
    non_negative(&format!("{name}.employer_rate"), rates.employer_rate)
}

fn non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::InvalidConfigValue {
            field: field.to_string(),
            message: format!("must not be negative, found {}", value),
        });
    }
    Ok(())
}
