//! Loan and advance installment quota enforcement.
//!
//! The total of concurrent installment deductions may not exceed the seizable
//! share ("quota cessible") of net pay. When it does, every installment is
//! reduced by the same ratio so that creditors absorb the shortfall in
//! proportion to what they asked for.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

use super::money::{round_currency, safe_div};

/// An installment a creditor asks to deduct this period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentRequest {
    /// Identifier of the loan or advance.
    pub id: String,
    /// Requested amount.
    pub amount: Decimal,
}

/// An installment after the quota has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustedInstallment {
    /// Identifier of the loan or advance.
    pub id: String,
    /// The amount originally requested.
    pub requested: Decimal,
    /// The amount actually deducted.
    pub amount: Decimal,
}

/// The outcome of quota enforcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentQuotaOutcome {
    /// `net_before_installments × quota_percentage / 100`.
    pub quota_cessible: Decimal,
    /// Sum of the requested amounts.
    pub total_requested: Decimal,
    /// The ratio every installment was reduced by, zero when under quota.
    pub reduction_ratio: Decimal,
    /// The installments, in request order.
    pub installments: Vec<AdjustedInstallment>,
}

impl InstallmentQuotaOutcome {
    /// Returns true if the installments had to be reduced.
    pub fn was_reduced(&self) -> bool {
        !self.reduction_ratio.is_zero()
    }

    /// Sum of the amounts actually deducted.
    pub fn total_deducted(&self) -> Decimal {
        self.installments.iter().map(|i| i.amount).sum()
    }
}

/// The result of quota enforcement, including the audit step.
#[derive(Debug, Clone)]
pub struct InstallmentQuotaResult {
    /// The enforcement outcome.
    pub outcome: InstallmentQuotaOutcome,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Caps installments to the seizable share of net pay.
///
/// If the requested total fits in the quota, installments are returned
/// unchanged. Otherwise each one becomes
/// `max(0, amount − amount × reduction_ratio)`, rounded half-up to cents, with
/// `reduction_ratio = (total − quota) / total`. The reduced sum is not forced to
/// match the quota exactly; per-item rounding may leave up to half a cent per item.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{InstallmentRequest, enforce_installment_quota};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let requests = vec![
///     InstallmentRequest { id: "loan_1".to_string(), amount: dec("10000") },
///     InstallmentRequest { id: "loan_2".to_string(), amount: dec("20000") },
///     InstallmentRequest { id: "advance".to_string(), amount: dec("30000") },
/// ];
///
/// let outcome = enforce_installment_quota(dec("100000"), dec("40"), &requests);
/// assert_eq!(outcome.quota_cessible, dec("40000"));
/// assert_eq!(outcome.installments[0].amount, dec("6666.67"));
/// assert_eq!(outcome.installments[1].amount, dec("13333.33"));
/// assert_eq!(outcome.installments[2].amount, dec("20000.00"));
/// ```
pub fn enforce_installment_quota(
    net_before_installments: Decimal,
    quota_percentage: Decimal,
    requests: &[InstallmentRequest],
) -> InstallmentQuotaOutcome {
    let quota_cessible = net_before_installments * quota_percentage / Decimal::ONE_HUNDRED;
    let total_requested: Decimal = requests.iter().map(|r| r.amount).sum();

    if total_requested <= quota_cessible {
        return InstallmentQuotaOutcome {
            quota_cessible,
            total_requested,
            reduction_ratio: Decimal::ZERO,
            installments: requests
                .iter()
                .map(|r| AdjustedInstallment {
                    id: r.id.clone(),
                    requested: r.amount,
                    amount: r.amount,
                })
                .collect(),
        };
    }

    let reduction_ratio = safe_div(total_requested - quota_cessible, total_requested);
    let installments = requests
        .iter()
        .map(|r| AdjustedInstallment {
            id: r.id.clone(),
            requested: r.amount,
            amount: round_currency((r.amount - r.amount * reduction_ratio).max(Decimal::ZERO)),
        })
        .collect();

    InstallmentQuotaOutcome {
        quota_cessible,
        total_requested,
        reduction_ratio,
        installments,
    }
}

/// Enforces the installment quota and records an audit step.
pub fn calculate_installment_quota(
    net_before_installments: Decimal,
    quota_percentage: Decimal,
    requests: &[InstallmentRequest],
    step_number: u32,
) -> InstallmentQuotaResult {
    let outcome = enforce_installment_quota(net_before_installments, quota_percentage, requests);

    let reasoning = if outcome.was_reduced() {
        format!(
            "Requested {} exceeds quota {} ({}% of {}): every installment reduced by ratio {}",
            outcome.total_requested,
            outcome.quota_cessible,
            quota_percentage.normalize(),
            net_before_installments,
            outcome.reduction_ratio.round_dp(5)
        )
    } else {
        format!(
            "Requested {} fits within quota {} ({}% of {})",
            outcome.total_requested,
            outcome.quota_cessible,
            quota_percentage.normalize(),
            net_before_installments
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "installment_quota".to_string(),
        rule_name: "Installment Quota (Quota Cessible)".to_string(),
        input: serde_json::json!({
            "net_before_installments": net_before_installments.to_string(),
            "quota_percentage": quota_percentage.normalize().to_string(),
            "requested": requests
                .iter()
                .map(|r| serde_json::json!({ "id": r.id, "amount": r.amount.to_string() }))
                .collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "quota_cessible": outcome.quota_cessible.to_string(),
            "reduced": outcome.was_reduced(),
            "installments": outcome
                .installments
                .iter()
                .map(|i| serde_json::json!({ "id": i.id, "amount": i.amount.to_string() }))
                .collect::<Vec<_>>()
        }),
        reasoning,
    };

    InstallmentQuotaResult {
        outcome,
        audit_step,
    }
}
