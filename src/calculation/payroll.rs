//! Payroll calculation orchestration.
//!
//! Turns a period's line items into a [`PayrollResult`], strictly in this order:
//!
//! 1. Partition line items into gains, gross deductions and net deductions.
//! 2. Derive the fund-A, fund-B and income tax bases from flagged gains, less
//!    gross deductions, clamped at zero.
//! 3. Fund-A contribution, if the pay-run policy enables it.
//! 4. Fund-B contribution, if enabled.
//! 5. Income tax, if enabled, using the contributions from steps 3 and 4.
//! 6. Gross taxable and non-taxable split.
//! 7. Net salary.

use rust_decimal::Decimal;

use crate::config::RateConfiguration;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditTrace, CompensationLineItem, ContributionAmounts, DeductionSource,
    EmployeeTaxProfile, IncomeTaxBreakdown, LineItemKind, PayRunPolicy, PayrollResult,
};

use super::contribution::{SocialFund, calculate_contribution};
use super::income_tax::{IncomeTaxInput, calculate_income_tax};

/// Sums and bases derived from a period's line items (steps 1 and 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineItemTotals {
    /// Sum of all gains.
    pub gross_gains: Decimal,
    /// Sum of deductions taken from gross.
    pub gross_deductions: Decimal,
    /// Sum of deductions taken from net.
    pub net_deductions: Decimal,
    /// Sum of benefit-in-kind gains.
    pub benefits_in_kind: Decimal,
    /// Sum of benefit-in-kind gains that also feed the income tax base.
    pub taxable_benefits_in_kind: Decimal,
    /// Fund-A base after gross deductions, clamped at zero.
    pub fund_a_base: Decimal,
    /// Fund-B base after gross deductions, clamped at zero.
    pub fund_b_base: Decimal,
    /// Income tax base after gross deductions, clamped at zero.
    pub income_tax_base: Decimal,
}

/// Partitions line items and derives the three bases.
///
/// Negative amounts are taken as-is; only the final bases are clamped at zero.
pub fn summarize_line_items(items: &[CompensationLineItem]) -> LineItemTotals {
    let mut totals = LineItemTotals::default();

    for item in items {
        let amount = item.calculated_amount;
        match item.kind {
            LineItemKind::Gain => {
                totals.gross_gains += amount;
                if item.affects_social_fund_a {
                    totals.fund_a_base += amount;
                }
                if item.affects_social_fund_b {
                    totals.fund_b_base += amount;
                }
                if item.affects_income_tax {
                    totals.income_tax_base += amount;
                }
                if item.is_benefit_in_kind {
                    totals.benefits_in_kind += amount;
                    if item.affects_income_tax {
                        totals.taxable_benefits_in_kind += amount;
                    }
                }
            }
            LineItemKind::Deduction(DeductionSource::Gross) => totals.gross_deductions += amount,
            LineItemKind::Deduction(DeductionSource::Net) => totals.net_deductions += amount,
        }
    }

    totals.fund_a_base = (totals.fund_a_base - totals.gross_deductions).max(Decimal::ZERO);
    totals.fund_b_base = (totals.fund_b_base - totals.gross_deductions).max(Decimal::ZERO);
    totals.income_tax_base =
        (totals.income_tax_base - totals.gross_deductions).max(Decimal::ZERO);

    totals
}

/// Calculates the payroll result for one employee and pay run.
///
/// The configuration is validated before anything is computed; a malformed
/// configuration is the only way this function fails. Identical inputs always
/// produce identical results.
///
/// # Arguments
///
/// * `employee` - The employee's tax profile
/// * `policy` - The pay-run policy deciding which withholdings apply
/// * `items` - The period's line items
/// * `config` - The rate configuration snapshot
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_payroll;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{CompensationLineItem, EmployeeTaxProfile, PayRunPolicy};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("config/mauritania").unwrap();
/// let config = loader.rate_configuration(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()).unwrap();
/// let items = vec![
///     CompensationLineItem::gain("BASE_SALARY", Decimal::from_str("45000.00").unwrap())
///         .subject_to_all(),
/// ];
///
/// let result = calculate_payroll(
///     &EmployeeTaxProfile::national("emp_001"),
///     &PayRunPolicy::regular(),
///     &items,
///     config,
/// )
/// .unwrap();
///
/// assert!(result.reconciles());
/// assert_eq!(result.income_tax.total, result.income_tax.tranche1 + result.income_tax.tranche2 + result.income_tax.tranche3);
/// ```
pub fn calculate_payroll(
    employee: &EmployeeTaxProfile,
    policy: &PayRunPolicy,
    items: &[CompensationLineItem],
    config: &RateConfiguration,
) -> EngineResult<PayrollResult> {
    config.validate()?;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    // Steps 1 and 2: partition and bases
    let totals = summarize_line_items(items);
    steps.push(AuditStep {
        step_number,
        rule_id: "line_item_partition".to_string(),
        rule_name: "Line Item Partition and Bases".to_string(),
        input: serde_json::json!({
            "line_items": items.len()
        }),
        output: serde_json::json!({
            "gross_gains": totals.gross_gains.to_string(),
            "gross_deductions": totals.gross_deductions.to_string(),
            "net_deductions": totals.net_deductions.to_string(),
            "benefits_in_kind": totals.benefits_in_kind.to_string(),
            "fund_a_base": totals.fund_a_base.to_string(),
            "fund_b_base": totals.fund_b_base.to_string(),
            "income_tax_base": totals.income_tax_base.to_string()
        }),
        reasoning: format!(
            "{} line items: gains {}, gross deductions {}, net deductions {}",
            items.len(),
            totals.gross_gains,
            totals.gross_deductions,
            totals.net_deductions
        ),
    });
    step_number += 1;

    // Step 3: fund A
    let fund_a = if policy.subject_to_fund_a {
        let result = calculate_contribution(
            SocialFund::FundA,
            totals.fund_a_base,
            &config.fund_a,
            Some(employee.fund_a_reimbursement_multiplier()),
            step_number,
        );
        steps.push(result.audit_step);
        step_number += 1;
        result.amounts
    } else {
        ContributionAmounts::default()
    };

    // Step 4: fund B
    let fund_b = if policy.subject_to_fund_b {
        let result = calculate_contribution(
            SocialFund::FundB,
            totals.fund_b_base,
            &config.fund_b,
            Some(employee.fund_b_reimbursement_multiplier()),
            step_number,
        );
        steps.push(result.audit_step);
        step_number += 1;
        result.amounts
    } else {
        ContributionAmounts::default()
    };

    // Step 5: income tax
    let income_tax = if policy.subject_to_income_tax {
        let input = IncomeTaxInput {
            taxable_base: totals.income_tax_base,
            fund_a_contribution: fund_a.employee,
            fund_b_contribution: fund_b.employee,
            benefits_in_kind: totals.taxable_benefits_in_kind,
            is_expatriate: employee.is_expatriate,
        };
        let result = calculate_income_tax(&input, &config.income_tax, step_number);
        steps.push(result.audit_step);
        step_number += 1;
        result.breakdown
    } else {
        IncomeTaxBreakdown::default()
    };

    // Step 6: taxable split
    let gross_taxable = totals.income_tax_base;
    let gross_non_taxable = totals.gross_gains - gross_taxable;

    // Step 7: net
    let net_salary = totals.gross_gains
        - fund_a.employee
        - fund_b.employee
        - income_tax.total
        - totals.gross_deductions
        - totals.net_deductions
        - totals.benefits_in_kind;

    steps.push(AuditStep {
        step_number,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "pay_run": policy.code,
            "subject_to_fund_a": policy.subject_to_fund_a,
            "subject_to_fund_b": policy.subject_to_fund_b,
            "subject_to_income_tax": policy.subject_to_income_tax
        }),
        output: serde_json::json!({
            "gross_taxable": gross_taxable.to_string(),
            "gross_non_taxable": gross_non_taxable.to_string(),
            "net_salary": net_salary.to_string()
        }),
        reasoning: format!(
            "{} - {} - {} - {} - {} - {} - {} = {}",
            totals.gross_gains,
            fund_a.employee,
            fund_b.employee,
            income_tax.total,
            totals.gross_deductions,
            totals.net_deductions,
            totals.benefits_in_kind,
            net_salary
        ),
    });

    Ok(PayrollResult {
        employee_id: employee.employee_id.clone(),
        pay_run_code: policy.code.clone(),
        gross_gains: totals.gross_gains,
        gross_taxable,
        gross_non_taxable,
        fund_a_base: totals.fund_a_base,
        fund_b_base: totals.fund_b_base,
        fund_a,
        fund_b,
        income_tax,
        gross_deductions: totals.gross_deductions,
        net_deductions: totals.net_deductions,
        benefits_in_kind: totals.benefits_in_kind,
        net_salary,
        audit_trace: AuditTrace {
            steps,
            warnings: vec![],
        },
    })
}
