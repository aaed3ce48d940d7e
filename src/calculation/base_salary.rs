//! Base salary proration and hourly rate derivation.
//!
//! Missing input data never fails a calculation here: a missing salary grade,
//! a missing worked-days record or zero contract hours all default to zero and
//! are reported back as [`InputDataDefault`]s for the caller to log.

use rust_decimal::Decimal;

use crate::models::{AuditStep, InputDataDefault, SalaryGrade};

use super::money::{round_currency, safe_div};

/// Weeks per year used to convert weekly contract hours into monthly hours.
pub const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// Months per year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The result of base salary proration.
#[derive(Debug, Clone)]
pub struct BaseSalaryResult {
    /// The prorated base salary for the period.
    pub amount: Decimal,
    /// The hourly rate derived from the full-month base.
    pub hourly_rate: Decimal,
    /// Input data that was defaulted.
    pub defaults: Vec<InputDataDefault>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prorates the monthly base salary by worked days.
///
/// `monthly_base × worked_days / standard_days`, rounded half-up. A zero
/// `standard_days` yields 0.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::prorate_base_salary;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// assert_eq!(prorate_base_salary(dec("45000"), dec("20"), dec("30")), dec("30000.00"));
/// ```
pub fn prorate_base_salary(
    monthly_base: Decimal,
    worked_days: Decimal,
    standard_days: Decimal,
) -> Decimal {
    round_currency(safe_div(monthly_base * worked_days, standard_days))
}

/// Derives the hourly rate from the monthly base and weekly contract hours.
///
/// `monthly_base × 12 / (weekly_hours × 52)`, rounded half-up to cents.
/// Missing or zero contract hours give an hourly rate of 0.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::hourly_rate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// assert_eq!(hourly_rate(dec("86666.67"), Some(dec("40"))), dec("500.00"));
/// assert_eq!(hourly_rate(dec("86666.67"), None), Decimal::ZERO);
/// ```
pub fn hourly_rate(monthly_base: Decimal, weekly_contract_hours: Option<Decimal>) -> Decimal {
    let weekly_hours = weekly_contract_hours.unwrap_or(Decimal::ZERO);
    round_currency(safe_div(
        monthly_base * MONTHS_PER_YEAR,
        weekly_hours * WEEKS_PER_YEAR,
    ))
}

/// Computes the period's base salary and hourly rate, defaulting missing data.
///
/// # Arguments
///
/// * `grade` - The employee's salary grade, if assigned
/// * `worked_days` - Days worked in the period, if recorded
/// * `standard_days` - Days in a full month
/// * `weekly_contract_hours` - Contractual weekly hours, if known
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_base_salary(
    grade: Option<&SalaryGrade>,
    worked_days: Option<Decimal>,
    standard_days: Decimal,
    weekly_contract_hours: Option<Decimal>,
    step_number: u32,
) -> BaseSalaryResult {
    let mut defaults = Vec::new();

    let monthly_base = match grade {
        Some(grade) => grade.monthly_base,
        None => {
            defaults.push(InputDataDefault::MissingSalaryGrade);
            Decimal::ZERO
        }
    };
    let days = match worked_days {
        Some(days) => days,
        None => {
            defaults.push(InputDataDefault::MissingWorkedDays);
            Decimal::ZERO
        }
    };
    if weekly_contract_hours.is_none_or(|hours| hours.is_zero()) {
        defaults.push(InputDataDefault::ZeroContractHours);
    }

    let amount = prorate_base_salary(monthly_base, days, standard_days);
    let rate = hourly_rate(monthly_base, weekly_contract_hours);

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_salary".to_string(),
        rule_name: "Base Salary Proration".to_string(),
        input: serde_json::json!({
            "grade": grade.map(|g| g.code.clone()),
            "monthly_base": monthly_base.to_string(),
            "worked_days": days.normalize().to_string(),
            "standard_days": standard_days.normalize().to_string(),
            "weekly_contract_hours": weekly_contract_hours.map(|h| h.normalize().to_string())
        }),
        output: serde_json::json!({
            "amount": amount.to_string(),
            "hourly_rate": rate.to_string(),
            "defaults": defaults.iter().map(|d| d.code()).collect::<Vec<_>>()
        }),
        reasoning: format!(
            "{} x {} / {} days = {}; hourly rate {}",
            monthly_base,
            days.normalize(),
            standard_days.normalize(),
            amount,
            rate
        ),
    };

    BaseSalaryResult {
        amount,
        hourly_rate: rate,
        defaults,
        audit_step,
    }
}
