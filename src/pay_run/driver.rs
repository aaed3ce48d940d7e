//! Concurrent pay-run execution.
//!
//! The configuration is validated once per run; a configuration error aborts
//! the whole run. Each employee is then computed on its own blocking task and
//! the payslips are returned in input order.

use std::sync::Arc;
use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::calculation::{InstallmentQuotaOutcome, calculate_installment_quota, calculate_payroll};
use crate::config::RateConfiguration;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditTrace, PayPeriod, PayRunPolicy, PayrollResult};

use super::input::{EmployeePeriodInput, PayRunRequest};
use super::standard::{build_standard_line_items, installment_line_items};

/// The pay outcome for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayslip {
    /// The employee identifier.
    pub employee_id: String,
    /// The final payroll result, installments included.
    pub result: PayrollResult,
    /// How the installment quota was applied.
    pub installments: InstallmentQuotaOutcome,
    /// Steps that produced the line items: base salary, overtime, quota.
    pub preparation: AuditTrace,
}

/// The outcome of a whole pay run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRunOutcome {
    /// The pay period.
    pub period: PayPeriod,
    /// The pay-run policy code.
    pub pay_run_code: String,
    /// One payslip per employee, in request order.
    pub payslips: Vec<EmployeePayslip>,
}

impl PayRunOutcome {
    /// Sum of net salaries.
    pub fn total_net_salary(&self) -> Decimal {
        self.payslips.iter().map(|p| p.result.net_salary).sum()
    }

    /// Sum of employer contributions across both funds.
    pub fn total_employer_contributions(&self) -> Decimal {
        self.payslips
            .iter()
            .map(|p| p.result.employer_contributions())
            .sum()
    }

    /// Sum of income tax withheld.
    pub fn total_income_tax(&self) -> Decimal {
        self.payslips.iter().map(|p| p.result.income_tax.total).sum()
    }
}

/// Computes one employee's payslip.
///
/// The result is calculated twice: once without installments to find the net
/// the quota applies to, then again with the adjusted installments deducted
/// from net.
pub fn compute_employee_payslip(
    input: &EmployeePeriodInput,
    policy: &PayRunPolicy,
    config: &RateConfiguration,
) -> EngineResult<EmployeePayslip> {
    let employee_id = input.employee.id();
    let standard = build_standard_line_items(&input.employee, &input.attendance, &config.payroll);

    for default in &standard.defaults {
        warn!(
            employee_id = %employee_id,
            code = default.code(),
            "Input data defaulted to zero"
        );
    }

    let mut items = standard.items;
    items.extend(input.line_items.iter().cloned());

    let preliminary = calculate_payroll(&input.employee.profile, policy, &items, config)?;

    let quota_step = standard.steps.len() as u32 + 1;
    let quota = calculate_installment_quota(
        preliminary.net_salary,
        config.payroll.installment_quota_percentage,
        &input.installments,
        quota_step,
    );
    if quota.outcome.was_reduced() {
        info!(
            employee_id = %employee_id,
            requested = %quota.outcome.total_requested,
            quota = %quota.outcome.quota_cessible,
            "Installments reduced to quota"
        );
    }

    items.extend(installment_line_items(&quota.outcome.installments));
    let mut result = calculate_payroll(&input.employee.profile, policy, &items, config)?;
    result
        .audit_trace
        .warnings
        .extend(standard.defaults.iter().map(|d| d.to_warning()));

    let mut steps = standard.steps;
    steps.push(quota.audit_step);

    Ok(EmployeePayslip {
        employee_id: employee_id.to_string(),
        result,
        installments: quota.outcome,
        preparation: AuditTrace {
            steps,
            warnings: vec![],
        },
    })
}

/// Runs a pay run over every employee of the request.
///
/// # Errors
///
/// Returns a configuration error before any employee is computed if `config`
/// is malformed, and [`EngineError::CalculationError`] if a worker task fails.
pub async fn run_pay_run(
    config: Arc<RateConfiguration>,
    request: PayRunRequest,
) -> EngineResult<PayRunOutcome> {
    config.validate()?;

    let start_time = Instant::now();
    let period = request.period;
    let employee_count = request.employees.len();
    info!(
        period = %period.label(),
        pay_run = %request.policy.code,
        employees = employee_count,
        "Starting pay run"
    );

    let policy = Arc::new(request.policy);
    let mut tasks = JoinSet::new();
    for (index, input) in request.employees.into_iter().enumerate() {
        let config = Arc::clone(&config);
        let policy = Arc::clone(&policy);
        tasks.spawn_blocking(move || (index, compute_employee_payslip(&input, &policy, &config)));
    }

    let mut slots: Vec<Option<EmployeePayslip>> = (0..employee_count).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, payslip) = joined.map_err(|err| EngineError::CalculationError {
            message: format!("Pay run worker failed: {}", err),
        })?;
        slots[index] = Some(payslip?);
    }
    let payslips: Vec<EmployeePayslip> = slots.into_iter().flatten().collect();

    let outcome = PayRunOutcome {
        period,
        pay_run_code: policy.code.clone(),
        payslips,
    };

    info!(
        period = %period.label(),
        employees = employee_count,
        total_net = %outcome.total_net_salary(),
        duration_us = start_time.elapsed().as_micros(),
        "Pay run completed"
    );

    Ok(outcome)
}
