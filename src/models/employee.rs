//! Employee model and related types.
//!
//! The [`EmployeeTaxProfile`] is all the calculation engine needs to know about
//! a person. The wider [`Employee`] record adds what the pay-run driver uses to
//! generate the standard line items (salary grade and contract hours).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-employee tax and contribution attributes.
///
/// # Example
///
/// ```
/// use payroll_engine::models::EmployeeTaxProfile;
/// use rust_decimal::Decimal;
///
/// let profile = EmployeeTaxProfile::national("emp_001");
/// assert!(!profile.is_expatriate);
/// assert_eq!(profile.fund_a_reimbursement_multiplier(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTaxProfile {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// Expatriates pay half the first income tax bracket rate.
    #[serde(default)]
    pub is_expatriate: bool,
    /// Multiplier added on top of the fund-A employer share, e.g. `0.5` for +50%.
    #[serde(default)]
    pub fund_a_employer_reimbursement: Option<Decimal>,
    /// Multiplier added on top of the fund-B employer share.
    #[serde(default)]
    pub fund_b_employer_reimbursement: Option<Decimal>,
}

impl EmployeeTaxProfile {
    /// Creates a profile for a national employee without reimbursement multipliers.
    pub fn national(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            is_expatriate: false,
            fund_a_employer_reimbursement: None,
            fund_b_employer_reimbursement: None,
        }
    }

    /// Creates a profile for an expatriate employee without reimbursement multipliers.
    pub fn expatriate(employee_id: impl Into<String>) -> Self {
        Self {
            is_expatriate: true,
            ..Self::national(employee_id)
        }
    }

    /// The fund-A employer reimbursement multiplier, defaulting to zero.
    pub fn fund_a_reimbursement_multiplier(&self) -> Decimal {
        self.fund_a_employer_reimbursement.unwrap_or(Decimal::ZERO)
    }

    /// The fund-B employer reimbursement multiplier, defaulting to zero.
    pub fn fund_b_reimbursement_multiplier(&self) -> Decimal {
        self.fund_b_employer_reimbursement.unwrap_or(Decimal::ZERO)
    }
}

/// A salary grade from the employer's grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryGrade {
    /// The grade code (e.g. "C3").
    pub code: String,
    /// The full-month base salary for the grade.
    pub monthly_base: Decimal,
}

/// An employee as seen by the pay-run driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Tax and contribution attributes.
    pub profile: EmployeeTaxProfile,
    /// The employee's salary grade, if one is assigned.
    #[serde(default)]
    pub salary_grade: Option<SalaryGrade>,
    /// Contractual hours per week, used to derive the hourly rate.
    #[serde(default)]
    pub weekly_contract_hours: Option<Decimal>,
}

impl Employee {
    /// Returns the employee identifier.
    pub fn id(&self) -> &str {
        &self.profile.employee_id
    }
}
