//! Standard line item generation.
//!
//! Every employee of a pay run gets a base salary gain and one gain per
//! overtime band worked, all subject to both funds and income tax. Approved
//! installments become net-sourced deductions once the quota has been applied.

use rust_decimal::Decimal;

use crate::calculation::{
    AdjustedInstallment, OvertimeBand, calculate_base_salary, calculate_holiday_overtime,
    calculate_overtime,
};
use crate::config::PayrollSettings;
use crate::models::{
    AuditStep, CompensationLineItem, DeductionSource, Employee, InputDataDefault, LineItemKind,
};

use super::input::Attendance;

/// Line item code of the prorated base salary.
pub const BASE_SALARY_CODE: &str = "BASE_SALARY";

/// Line item code of holiday overtime.
pub const HOLIDAY_OVERTIME_CODE: &str = "OVERTIME_HOLIDAY";

/// Prefix of installment deduction codes, followed by the installment id.
pub const INSTALLMENT_CODE_PREFIX: &str = "INSTALLMENT:";

/// Line item code of a chained overtime band.
pub fn overtime_band_code(band: u8) -> String {
    format!("OVERTIME_BAND_{}", band)
}

/// The generated items together with what was learned producing them.
#[derive(Debug, Clone)]
pub struct StandardLineItems {
    /// Base salary and overtime gains, in that order.
    pub items: Vec<CompensationLineItem>,
    /// The hourly rate overtime was priced at.
    pub hourly_rate: Decimal,
    /// Input data that had to be defaulted.
    pub defaults: Vec<InputDataDefault>,
    /// Audit steps, numbered from 1.
    pub steps: Vec<AuditStep>,
}

fn band_item(code: String, band: &OvertimeBand) -> CompensationLineItem {
    CompensationLineItem::priced(
        code,
        LineItemKind::Gain,
        band.hourly_rate * band.multiplier,
        band.hours,
    )
    .subject_to_all()
}

/// Builds the standard gains for one employee and period.
///
/// Bands without hours produce no line item. Missing grade, worked days or
/// contract hours are defaulted to zero and reported in `defaults`.
pub fn build_standard_line_items(
    employee: &Employee,
    attendance: &Attendance,
    settings: &PayrollSettings,
) -> StandardLineItems {
    let mut steps = Vec::new();
    let mut step_number: u32 = 1;

    let base = calculate_base_salary(
        employee.salary_grade.as_ref(),
        attendance.worked_days,
        settings.standard_days_per_month,
        employee.weekly_contract_hours,
        step_number,
    );
    steps.push(base.audit_step);
    step_number += 1;

    let mut items =
        vec![CompensationLineItem::gain(BASE_SALARY_CODE, base.amount).subject_to_all()];

    if attendance.overtime_hours > Decimal::ZERO {
        let overtime = calculate_overtime(attendance.overtime_hours, base.hourly_rate, step_number);
        items.extend(
            overtime
                .bands
                .iter()
                .filter(|b| b.hours > Decimal::ZERO)
                .map(|b| band_item(overtime_band_code(b.band), b)),
        );
        steps.push(overtime.audit_step);
        step_number += 1;
    }

    if attendance.holiday_overtime_hours > Decimal::ZERO {
        let holiday =
            calculate_holiday_overtime(attendance.holiday_overtime_hours, base.hourly_rate);
        steps.push(AuditStep {
            step_number,
            rule_id: "holiday_overtime".to_string(),
            rule_name: "Holiday Overtime".to_string(),
            input: serde_json::json!({
                "hours": holiday.hours.normalize().to_string(),
                "hourly_rate": holiday.hourly_rate.to_string()
            }),
            output: serde_json::json!({
                "amount": holiday.amount.to_string()
            }),
            reasoning: format!(
                "{} h x {} x {} = {}",
                holiday.hours.normalize(),
                holiday.hourly_rate,
                holiday.multiplier.normalize(),
                holiday.amount
            ),
        });
        items.push(band_item(HOLIDAY_OVERTIME_CODE.to_string(), &holiday));
    }

    StandardLineItems {
        items,
        hourly_rate: base.hourly_rate,
        defaults: base.defaults,
        steps,
    }
}

/// Turns quota-adjusted installments into net-sourced deductions.
///
/// Installments reduced to zero are dropped.
pub fn installment_line_items(installments: &[AdjustedInstallment]) -> Vec<CompensationLineItem> {
    installments
        .iter()
        .filter(|i| !i.amount.is_zero())
        .map(|i| {
            CompensationLineItem::deduction(
                format!("{}{}", INSTALLMENT_CODE_PREFIX, i.id),
                DeductionSource::Net,
                i.amount,
            )
        })
        .collect()
}
