//! Social contribution calculation functionality.
//!
//! Computes the employee and employer shares of the fund-A (CNSS) and
//! fund-B (CNAM) contributions. The ceiling always caps the base before the
//! rate is applied.

use rust_decimal::Decimal;

use crate::config::ContributionRates;
use crate::models::{AuditStep, ContributionAmounts};

use super::money::round_currency;

/// The two social funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialFund {
    /// Social security (CNSS), capped base.
    FundA,
    /// Health insurance (CNAM).
    FundB,
}

impl SocialFund {
    fn rule_id(&self) -> &'static str {
        match self {
            SocialFund::FundA => "fund_a_contribution",
            SocialFund::FundB => "fund_b_contribution",
        }
    }

    fn rule_name(&self) -> &'static str {
        match self {
            SocialFund::FundA => "Social Security Contribution (CNSS)",
            SocialFund::FundB => "Health Insurance Contribution (CNAM)",
        }
    }
}

/// The result of a contribution calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct ContributionResult {
    /// The employee and employer shares.
    pub amounts: ContributionAmounts,
    /// The base after the ceiling was applied.
    pub capped_base: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn capped(base: Decimal, ceiling: Option<Decimal>) -> Decimal {
    match ceiling {
        Some(ceiling) => base.min(ceiling),
        None => base,
    }
}

/// Computes the employee share: `min(base, ceiling) × rate`, rounded half-up.
///
/// A `None` ceiling leaves the base uncapped.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_employee_contribution;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let amount = compute_employee_contribution(dec("200000"), Some(dec("15000")), dec("0.01"));
/// assert_eq!(amount, dec("150.00"));
/// ```
pub fn compute_employee_contribution(
    base: Decimal,
    ceiling: Option<Decimal>,
    rate: Decimal,
) -> Decimal {
    round_currency(capped(base, ceiling) * rate)
}

/// Computes the employer share: `min(base, ceiling) × rate × (1 + reimbursement)`,
/// rounded half-up.
///
/// A missing reimbursement multiplier counts as zero.
pub fn compute_employer_contribution(
    base: Decimal,
    ceiling: Option<Decimal>,
    rate: Decimal,
    reimbursement_multiplier: Option<Decimal>,
) -> Decimal {
    let multiplier = Decimal::ONE + reimbursement_multiplier.unwrap_or(Decimal::ZERO);
    round_currency(capped(base, ceiling) * rate * multiplier)
}

/// Calculates both shares of one fund's contribution and records an audit step.
///
/// # Arguments
///
/// * `fund` - Which fund the contribution is for
/// * `base` - The contribution base after gross deductions
/// * `rates` - The fund's ceiling and rates
/// * `reimbursement_multiplier` - Optional employer reimbursement multiplier
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_contribution(
    fund: SocialFund,
    base: Decimal,
    rates: &ContributionRates,
    reimbursement_multiplier: Option<Decimal>,
    step_number: u32,
) -> ContributionResult {
    let capped_base = capped(base, rates.ceiling);
    let employee = compute_employee_contribution(base, rates.ceiling, rates.employee_rate);
    let employer = compute_employer_contribution(
        base,
        rates.ceiling,
        rates.employer_rate,
        reimbursement_multiplier,
    );

    let ceiling_note = match rates.ceiling {
        Some(ceiling) if base > ceiling => format!(" (capped at ceiling {})", ceiling),
        _ => String::new(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: fund.rule_id().to_string(),
        rule_name: fund.rule_name().to_string(),
        input: serde_json::json!({
            "base": base.to_string(),
            "ceiling": rates.ceiling.map(|c| c.to_string()),
            "employee_rate": rates.employee_rate.normalize().to_string(),
            "employer_rate": rates.employer_rate.normalize().to_string(),
            "reimbursement_multiplier": reimbursement_multiplier.map(|m| m.normalize().to_string())
        }),
        output: serde_json::json!({
            "capped_base": capped_base.to_string(),
            "employee": employee.to_string(),
            "employer": employer.to_string()
        }),
        reasoning: format!(
            "Base {}{}: employee {} x {} = {}, employer {} x {} = {}",
            base,
            ceiling_note,
            capped_base,
            rates.employee_rate.normalize(),
            employee,
            capped_base,
            rates.employer_rate.normalize(),
            employer
        ),
    };

    ContributionResult {
        amounts: ContributionAmounts { employee, employer },
        capped_base,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn fund_a_rates() -> ContributionRates {
        ContributionRates {
            ceiling: Some(dec("15000")),
            employee_rate: dec("0.01"),
            employer_rate: dec("0.13"),
        }
    }

    fn fund_b_rates() -> ContributionRates {
        ContributionRates {
            ceiling: None,
            employee_rate: dec("0.04"),
            employer_rate: dec("0.05"),
        }
    }

    #[test]
    fn test_base_above_ceiling_is_capped() {
        assert_eq!(
            compute_employee_contribution(dec("200000"), Some(dec("15000")), dec("0.01")),
            dec("150.00")
        );
    }

    #[test]
    fn test_base_below_ceiling_is_used_as_is() {
        assert_eq!(
            compute_employee_contribution(dec("12000"), Some(dec("15000")), dec("0.01")),
            dec("120.00")
        );
    }

    #[test]
    fn test_raising_base_beyond_ceiling_changes_nothing() {
        let at_ceiling =
            compute_employee_contribution(dec("15000"), Some(dec("15000")), dec("0.01"));
        let far_above =
            compute_employee_contribution(dec("999999.99"), Some(dec("15000")), dec("0.01"));
        assert_eq!(at_ceiling, far_above);
    }

    #[test]
    fn test_uncapped_base() {
        assert_eq!(
            compute_employee_contribution(dec("200000"), None, dec("0.04")),
            dec("8000.00")
        );
    }

    #[test]
    fn test_employee_share_is_rounded_half_up() {
        // 1234.50 × 0.01 = 12.345 -> 12.35
        assert_eq!(
            compute_employee_contribution(dec("1234.50"), None, dec("0.01")),
            dec("12.35")
        );
    }

    #[test]
    fn test_employer_share_without_reimbursement() {
        assert_eq!(
            compute_employer_contribution(dec("200000"), Some(dec("15000")), dec("0.13"), None),
            dec("1950.00")
        );
    }

    #[test]
    fn test_employer_share_with_reimbursement_multiplier() {
        // 15000 × 0.13 × 1.5 = 2925
        assert_eq!(
            compute_employer_contribution(
                dec("200000"),
                Some(dec("15000")),
                dec("0.13"),
                Some(dec("0.5"))
            ),
            dec("2925.00")
        );
    }

    #[test]
    fn test_employer_share_rounds_after_multiplier() {
        // 1000.10 × 0.05 × 1.1 = 55.0055 -> 55.01
        assert_eq!(
            compute_employer_contribution(dec("1000.10"), None, dec("0.05"), Some(dec("0.1"))),
            dec("55.01")
        );
    }

    #[test]
    fn test_calculate_contribution_fund_a() {
        let result = calculate_contribution(
            SocialFund::FundA,
            dec("200000"),
            &fund_a_rates(),
            None,
            3,
        );

        assert_eq!(result.capped_base, dec("15000"));
        assert_eq!(result.amounts.employee, dec("150.00"));
        assert_eq!(result.amounts.employer, dec("1950.00"));
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "fund_a_contribution");
        assert_eq!(
            result.audit_step.output["employee"].as_str().unwrap(),
            "150.00"
        );
        assert!(result.audit_step.reasoning.contains("capped at ceiling 15000"));
    }

    #[test]
    fn test_calculate_contribution_fund_b_uncapped() {
        let result = calculate_contribution(
            SocialFund::FundB,
            dec("45000.00"),
            &fund_b_rates(),
            Some(dec("0.2")),
            4,
        );

        assert_eq!(result.capped_base, dec("45000.00"));
        assert_eq!(result.amounts.employee, dec("1800.00"));
        // 45000 × 0.05 × 1.2 = 2700
        assert_eq!(result.amounts.employer, dec("2700.00"));
        assert_eq!(result.audit_step.rule_id, "fund_b_contribution");
        assert!(result.audit_step.input["ceiling"].is_null());
        assert!(!result.audit_step.reasoning.contains("capped"));
    }

    #[test]
    fn test_zero_base_gives_zero_contribution() {
        let result =
            calculate_contribution(SocialFund::FundA, Decimal::ZERO, &fund_a_rates(), None, 1);
        assert!(result.amounts.employee.is_zero());
        assert!(result.amounts.employer.is_zero());
    }
}
