//! Request types for the Payroll Calculation Engine API.
//!
//! `/calculate` takes [`CalculationRequest`]; `/pay-run` takes a
//! [`PayRunRequest`](crate::pay_run::PayRunRequest) as is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{CompensationLineItem, EmployeeTaxProfile, PayRunPolicy};

/// Request body for the `/calculate` endpoint.
///
/// Calculates one employee's result from already-priced line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee's tax profile.
    pub employee: EmployeeTaxProfile,
    /// The pay-run policy; a regular run when omitted.
    #[serde(default = "PayRunPolicy::regular")]
    pub policy: PayRunPolicy,
    /// The date that selects the rate configuration.
    pub effective_date: NaiveDate,
    /// The period's line items.
    #[serde(default)]
    pub line_items: Vec<CompensationLineItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeductionSource, LineItemKind};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_calculation_request() {
        let json = r#"{
            "employee": { "employee_id": "emp_001", "is_expatriate": true },
            "effective_date": "2025-03-31",
            "line_items": [
                {
                    "code": "BASE_SALARY",
                    "kind": "gain",
                    "base_amount": "45000.00",
                    "quantity": "1",
                    "calculated_amount": "45000.00",
                    "affects_social_fund_a": true,
                    "affects_social_fund_b": true,
                    "affects_income_tax": true
                },
                {
                    "code": "LOAN",
                    "kind": { "deduction": "net" },
                    "base_amount": "1000.00",
                    "quantity": "1",
                    "calculated_amount": "1000.00"
                }
            ]
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee.employee_id, "emp_001");
        assert!(request.employee.is_expatriate);
        assert_eq!(request.policy, PayRunPolicy::regular());
        assert_eq!(request.line_items.len(), 2);
        assert_eq!(request.line_items[0].kind, LineItemKind::Gain);
        assert_eq!(
            request.line_items[1].kind,
            LineItemKind::Deduction(DeductionSource::Net)
        );
        assert!(!request.line_items[1].affects_income_tax);
        assert_eq!(
            request.line_items[0].calculated_amount,
            Decimal::from_str("45000.00").unwrap()
        );
    }

    #[test]
    fn test_explicit_policy() {
        let json = r#"{
            "employee": { "employee_id": "emp_001" },
            "policy": {
                "code": "BONUS",
                "subject_to_fund_a": false,
                "subject_to_fund_b": true,
                "subject_to_income_tax": true
            },
            "effective_date": "2025-03-31"
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.policy.code, "BONUS");
        assert!(!request.policy.subject_to_fund_a);
        assert!(request.line_items.is_empty());
    }
}
