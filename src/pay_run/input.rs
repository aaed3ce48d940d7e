//! Per-employee inputs of a pay run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::InstallmentRequest;
use crate::models::{CompensationLineItem, Employee, PayPeriod, PayRunPolicy};

/// Time and attendance figures for one employee and period.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attendance {
    /// Days worked. `None` when no attendance record exists.
    #[serde(default)]
    pub worked_days: Option<Decimal>,
    /// Overtime hours beyond the standard threshold, banded 1 to 3.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Overtime hours worked on public holidays (band 4).
    #[serde(default)]
    pub holiday_overtime_hours: Decimal,
}

/// Everything the driver needs to pay one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePeriodInput {
    /// The employee.
    pub employee: Employee,
    /// Attendance for the period.
    #[serde(default)]
    pub attendance: Attendance,
    /// Additional line items (allowances, bonuses, deductions).
    #[serde(default)]
    pub line_items: Vec<CompensationLineItem>,
    /// Loan and advance installments requested this period.
    #[serde(default)]
    pub installments: Vec<InstallmentRequest>,
}

/// A batch pay run over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRunRequest {
    /// The pay period.
    pub period: PayPeriod,
    /// The pay-run policy applied to every employee.
    #[serde(default = "PayRunPolicy::regular")]
    pub policy: PayRunPolicy,
    /// The employees to pay, in output order.
    pub employees: Vec<EmployeePeriodInput>,
}
