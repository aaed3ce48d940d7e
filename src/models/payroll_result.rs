//! Payroll result models for the Payroll Calculation Engine.
//!
//! This module contains the [`PayrollResult`] type and its associated structures
//! that capture all outputs of a pay calculation: gross, contributions, tax
//! tranches, net salary and an audit trace of every rule applied.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee and employer shares of one social contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContributionAmounts {
    /// The share withheld from the employee's pay.
    pub employee: Decimal,
    /// The share paid by the employer.
    pub employer: Decimal,
}

/// One bracket's worth of a progressive schedule.
///
/// # Example
///
/// ```
/// use payroll_engine::models::BracketAmount;
/// use rust_decimal::Decimal;
///
/// let bracket = BracketAmount {
///     lower_bound: Decimal::ZERO,
///     upper_bound: Some(Decimal::new(9000, 0)),
///     rate: Decimal::new(15, 2),
///     portion: Decimal::new(9000, 0),
///     amount: Decimal::new(135000, 2),
/// };
/// assert!(!bracket.is_unbounded());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketAmount {
    /// Lower bound of the bracket.
    pub lower_bound: Decimal,
    /// Upper bound of the bracket, `None` for the open top bracket.
    pub upper_bound: Option<Decimal>,
    /// The rate actually applied to this bracket.
    pub rate: Decimal,
    /// The portion of the base that falls in this bracket.
    pub portion: Decimal,
    /// `portion × rate`, rounded half-up to cents.
    pub amount: Decimal,
}

impl BracketAmount {
    /// Returns true for the open top bracket.
    pub fn is_unbounded(&self) -> bool {
        self.upper_bound.is_none()
    }
}

/// The income tax (ITS) part of a payroll result.
///
/// Only three tranches are reported; brackets beyond the third are folded into
/// `tranche3`. `total` is always the sum of the rounded tranches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncomeTaxBreakdown {
    /// The base the schedule was run over (after deductions and abatement).
    pub adjusted_base: Decimal,
    /// Tax on the first bracket.
    pub tranche1: Decimal,
    /// Tax on the second bracket.
    pub tranche2: Decimal,
    /// Tax on the third and any further brackets.
    pub tranche3: Decimal,
    /// Total income tax.
    pub total: Decimal,
    /// Every bracket of the schedule, including those folded into `tranche3`.
    pub brackets: Vec<BracketAmount>,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate missing input data that was defaulted rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// Input data that was missing and silently defaulted to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputDataDefault {
    /// No worked-days record for the period; 0 days were used.
    MissingWorkedDays,
    /// No salary grade assigned; a base salary of 0 was used.
    MissingSalaryGrade,
    /// Weekly contract hours missing or zero; an hourly rate of 0 was used.
    ZeroContractHours,
}

impl InputDataDefault {
    /// The warning code for this default.
    pub fn code(&self) -> &'static str {
        match self {
            InputDataDefault::MissingWorkedDays => "MISSING_WORKED_DAYS",
            InputDataDefault::MissingSalaryGrade => "MISSING_SALARY_GRADE",
            InputDataDefault::ZeroContractHours => "ZERO_CONTRACT_HOURS",
        }
    }

    /// Converts the default into an audit warning.
    pub fn to_warning(&self) -> AuditWarning {
        let message = match self {
            InputDataDefault::MissingWorkedDays => {
                "No worked-days record for the period, 0 worked days used"
            }
            InputDataDefault::MissingSalaryGrade => {
                "No salary grade assigned, base salary of 0 used"
            }
            InputDataDefault::ZeroContractHours => {
                "Weekly contract hours missing or zero, hourly rate of 0 used"
            }
        };
        AuditWarning {
            code: self.code().to_string(),
            message: message.to_string(),
            severity: "medium".to_string(),
        }
    }
}

/// The complete audit trace for a calculation.
///
/// Contains no timestamps so that identical inputs yield identical traces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a payroll calculation for one employee and pay run.
///
/// Produced fresh on every call; the caller owns persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The employee the result is for.
    pub employee_id: String,
    /// The pay-run policy code the result was computed under.
    pub pay_run_code: String,
    /// Sum of all gain line items.
    pub gross_gains: Decimal,
    /// The income tax base after gross deductions, before abatement.
    pub gross_taxable: Decimal,
    /// `gross_gains − gross_taxable`.
    pub gross_non_taxable: Decimal,
    /// The fund-A base after gross deductions, before the ceiling.
    pub fund_a_base: Decimal,
    /// The fund-B base after gross deductions.
    pub fund_b_base: Decimal,
    /// Fund-A (CNSS) contribution shares.
    pub fund_a: ContributionAmounts,
    /// Fund-B (CNAM) contribution shares.
    pub fund_b: ContributionAmounts,
    /// Income tax (ITS) breakdown.
    pub income_tax: IncomeTaxBreakdown,
    /// Sum of deductions taken from gross.
    pub gross_deductions: Decimal,
    /// Sum of deductions taken from net.
    pub net_deductions: Decimal,
    /// Sum of benefit-in-kind gains.
    pub benefits_in_kind: Decimal,
    /// The amount paid out.
    pub net_salary: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl PayrollResult {
    /// Total contributions withheld from the employee.
    pub fn employee_contributions(&self) -> Decimal {
        self.fund_a.employee + self.fund_b.employee
    }

    /// Total contributions paid by the employer.
    pub fn employer_contributions(&self) -> Decimal {
        self.fund_a.employer + self.fund_b.employer
    }

    /// Checks the net salary against its defining equation.
    pub fn reconciles(&self) -> bool {
        self.net_salary
            == self.gross_gains
                - self.employee_contributions()
                - self.income_tax.total
                - self.gross_deductions
                - self.net_deductions
                - self.benefits_in_kind
    }
}
