//! Progressive income tax (ITS) calculation functionality.
//!
//! ## Algorithm
//!
//! 1. Start from the taxable base; subtract the fund-A and fund-B employee
//!    contributions when the corresponding toggle is set, and the taxable
//!    benefits in kind when they are configured as exempt.
//! 2. Subtract the flat abatement, clamping at zero.
//! 3. Run the bracket schedule. Expatriates pay half the first bracket rate.
//! 4. Report the first three brackets as tranches; later brackets fold into
//!    tranche 3. The total is the sum of the rounded tranches.

use rust_decimal::Decimal;

use crate::config::{BenefitsInKindTaxation, IncomeTaxConfig, TaxBracket};
use crate::models::{AuditStep, IncomeTaxBreakdown};

use super::tiered_schedule::evaluate_schedule;

/// Everything the tax calculation needs besides the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IncomeTaxInput {
    /// The income tax base after gross deductions, before abatement.
    pub taxable_base: Decimal,
    /// The fund-A employee contribution just computed.
    pub fund_a_contribution: Decimal,
    /// The fund-B employee contribution just computed.
    pub fund_b_contribution: Decimal,
    /// Benefits in kind that are part of the taxable base.
    pub benefits_in_kind: Decimal,
    /// Whether the first bracket rate is halved.
    pub is_expatriate: bool,
}

/// The result of an income tax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// The tax breakdown.
    pub breakdown: IncomeTaxBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the bracket table with the first bracket's rate halved.
///
/// Later brackets are unaffected.
pub fn expatriate_brackets(brackets: &[TaxBracket]) -> Vec<TaxBracket> {
    let mut adjusted = brackets.to_vec();
    if let Some(first) = adjusted.first_mut() {
        first.rate /= Decimal::TWO;
    }
    adjusted
}

/// Derives the base the schedule runs over (steps 1 and 2).
pub fn adjusted_tax_base(input: &IncomeTaxInput, config: &IncomeTaxConfig) -> Decimal {
    let mut base = input.taxable_base;
    if config.deduct_fund_a_from_base {
        base -= input.fund_a_contribution;
    }
    if config.deduct_fund_b_from_base {
        base -= input.fund_b_contribution;
    }
    if config.benefits_in_kind == BenefitsInKindTaxation::Exempt {
        base -= input.benefits_in_kind;
    }
    (base - config.abatement).max(Decimal::ZERO)
}

/// Computes the income tax breakdown.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{IncomeTaxInput, compute_income_tax};
/// use payroll_engine::config::{BenefitsInKindTaxation, IncomeTaxConfig, TaxBracket};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let config = IncomeTaxConfig {
///     brackets: vec![
///         TaxBracket::bounded(dec("0"), dec("9000"), dec("0.15")),
///         TaxBracket::bounded(dec("9000"), dec("21000"), dec("0.25")),
///         TaxBracket::unbounded(dec("21000"), dec("0.40")),
///     ],
///     abatement: Decimal::ZERO,
///     deduct_fund_a_from_base: false,
///     deduct_fund_b_from_base: false,
///     benefits_in_kind: BenefitsInKindTaxation::Taxable,
/// };
/// let input = IncomeTaxInput {
///     taxable_base: dec("50000"),
///     ..IncomeTaxInput::default()
/// };
///
/// let tax = compute_income_tax(&input, &config);
/// assert_eq!(tax.total, dec("15950.00"));
/// ```
pub fn compute_income_tax(input: &IncomeTaxInput, config: &IncomeTaxConfig) -> IncomeTaxBreakdown {
    let adjusted_base = adjusted_tax_base(input, config);

    let brackets = if input.is_expatriate {
        evaluate_schedule(adjusted_base, &expatriate_brackets(&config.brackets))
    } else {
        evaluate_schedule(adjusted_base, &config.brackets)
    };

    let tranche = |index: usize| {
        brackets
            .get(index)
            .map(|b| b.amount)
            .unwrap_or(Decimal::ZERO)
    };
    let tranche1 = tranche(0);
    let tranche2 = tranche(1);
    let tranche3: Decimal = brackets.iter().skip(2).map(|b| b.amount).sum();

    IncomeTaxBreakdown {
        adjusted_base,
        tranche1,
        tranche2,
        tranche3,
        total: tranche1 + tranche2 + tranche3,
        brackets,
    }
}

/// Calculates income tax and records an audit step.
///
/// # Arguments
///
/// * `input` - The taxable base and the amounts it may be reduced by
/// * `config` - Brackets, abatement and deduction toggles
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_income_tax(
    input: &IncomeTaxInput,
    config: &IncomeTaxConfig,
    step_number: u32,
) -> IncomeTaxResult {
    let breakdown = compute_income_tax(input, config);

    let first_rate = breakdown
        .brackets
        .first()
        .map(|b| b.rate.normalize().to_string())
        .unwrap_or_default();
    let expatriate_note = if input.is_expatriate {
        format!(", expatriate first bracket rate {}", first_rate)
    } else {
        String::new()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax on Salaries (ITS)".to_string(),
        input: serde_json::json!({
            "taxable_base": input.taxable_base.to_string(),
            "fund_a_contribution": input.fund_a_contribution.to_string(),
            "fund_b_contribution": input.fund_b_contribution.to_string(),
            "benefits_in_kind": input.benefits_in_kind.to_string(),
            "is_expatriate": input.is_expatriate,
            "abatement": config.abatement.to_string(),
            "deduct_fund_a_from_base": config.deduct_fund_a_from_base,
            "deduct_fund_b_from_base": config.deduct_fund_b_from_base
        }),
        output: serde_json::json!({
            "adjusted_base": breakdown.adjusted_base.to_string(),
            "tranche1": breakdown.tranche1.to_string(),
            "tranche2": breakdown.tranche2.to_string(),
            "tranche3": breakdown.tranche3.to_string(),
            "total": breakdown.total.to_string()
        }),
        reasoning: format!(
            "Adjusted base {}{}: {} + {} + {} = {}",
            breakdown.adjusted_base,
            expatriate_note,
            breakdown.tranche1,
            breakdown.tranche2,
            breakdown.tranche3,
            breakdown.total
        ),
    };

    IncomeTaxResult {
        breakdown,
        audit_step,
    }
}
