//! Calculation logic for the payroll engine.
//!
//! This module contains the individual calculators (base salary proration,
//! overtime bands, social contributions, progressive income tax and the
//! installment quota) and the orchestrator that runs them in order to
//! produce a [`PayrollResult`](crate::models::PayrollResult).

mod base_salary;
mod contribution;
mod income_tax;
mod installment_quota;
mod money;
mod overtime_bands;
mod payroll;
mod tiered_schedule;

pub use base_salary::{
    BaseSalaryResult, MONTHS_PER_YEAR, WEEKS_PER_YEAR, calculate_base_salary, hourly_rate,
    prorate_base_salary,
};
pub use contribution::{
    ContributionResult, SocialFund, calculate_contribution, compute_employee_contribution,
    compute_employer_contribution,
};
pub use income_tax::{
    IncomeTaxInput, IncomeTaxResult, adjusted_tax_base, calculate_income_tax, compute_income_tax,
    expatriate_brackets,
};
pub use installment_quota::{
    AdjustedInstallment, InstallmentQuotaOutcome, InstallmentQuotaResult, InstallmentRequest,
    calculate_installment_quota, enforce_installment_quota,
};
pub use money::{CURRENCY_DECIMAL_PLACES, round_currency, safe_div};
pub use overtime_bands::{
    HOLIDAY_OVERTIME_MULTIPLIER, OVERTIME_BAND_1_MAX_HOURS, OVERTIME_BAND_1_MULTIPLIER,
    OVERTIME_BAND_2_MAX_HOURS, OVERTIME_BAND_2_MULTIPLIER, OVERTIME_BAND_3_MULTIPLIER,
    OvertimeBand, OvertimeResult, calculate_holiday_overtime, calculate_overtime,
    split_overtime_hours,
};
pub use payroll::{LineItemTotals, calculate_payroll, summarize_line_items};
pub use tiered_schedule::evaluate_schedule;
