//! Batch pay-run driver.
//!
//! Generates the standard line items for each employee from attendance and
//! salary grade, enforces the installment quota against net pay, and runs the
//! payroll calculation for every employee of a run concurrently.

mod driver;
mod input;
mod standard;

pub use driver::{EmployeePayslip, PayRunOutcome, compute_employee_payslip, run_pay_run};
pub use input::{Attendance, EmployeePeriodInput, PayRunRequest};
pub use standard::{
    BASE_SALARY_CODE, HOLIDAY_OVERTIME_CODE, INSTALLMENT_CODE_PREFIX, StandardLineItems,
    build_standard_line_items, installment_line_items, overtime_band_code,
};
