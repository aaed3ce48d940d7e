//! Core data models for the Payroll Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod line_item;
mod pay_period;
mod pay_run_policy;
mod payroll_result;

pub use employee::{Employee, EmployeeTaxProfile, SalaryGrade};
pub use line_item::{CompensationLineItem, DeductionSource, LineItemKind};
pub use pay_period::PayPeriod;
pub use pay_run_policy::PayRunPolicy;
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, BracketAmount, ContributionAmounts, IncomeTaxBreakdown,
    InputDataDefault, PayrollResult,
};
