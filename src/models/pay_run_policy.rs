//! Pay-run policy ("motif") model.
//!
//! The policy is the reason for a pay run (regular salary, bonus, termination)
//! and decides which contributions and taxes apply to it.

use serde::{Deserialize, Serialize};

/// Toggles which contributions and taxes apply to a pay run.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayRunPolicy;
///
/// let bonus = PayRunPolicy {
///     subject_to_fund_a: false,
///     ..PayRunPolicy::regular()
/// };
/// assert!(bonus.subject_to_income_tax);
/// assert!(!bonus.subject_to_fund_a);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayRunPolicy {
    /// The motif code (e.g. "REGULAR", "BONUS").
    pub code: String,
    /// Whether the fund-A (CNSS) contribution is computed.
    pub subject_to_fund_a: bool,
    /// Whether the fund-B (CNAM) contribution is computed.
    pub subject_to_fund_b: bool,
    /// Whether income tax (ITS) is computed.
    pub subject_to_income_tax: bool,
}

impl PayRunPolicy {
    /// The regular monthly salary run: every contribution and the tax apply.
    pub fn regular() -> Self {
        Self {
            code: "REGULAR".to_string(),
            subject_to_fund_a: true,
            subject_to_fund_b: true,
            subject_to_income_tax: true,
        }
    }

    /// A run where nothing is withheld.
    pub fn exempt(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            subject_to_fund_a: false,
            subject_to_fund_b: false,
            subject_to_income_tax: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_enables_everything() {
        let policy = PayRunPolicy::regular();
        assert_eq!(policy.code, "REGULAR");
        assert!(policy.subject_to_fund_a);
        assert!(policy.subject_to_fund_b);
        assert!(policy.subject_to_income_tax);
    }

    #[test]
    fn test_exempt_disables_everything() {
        let policy = PayRunPolicy::exempt("EXPENSES");
        assert_eq!(policy.code, "EXPENSES");
        assert!(!policy.subject_to_fund_a);
        assert!(!policy.subject_to_fund_b);
        assert!(!policy.subject_to_income_tax);
    }

    #[test]
    fn test_deserialize_policy() {
        let json = r#"{
            "code": "BONUS",
            "subject_to_fund_a": false,
            "subject_to_fund_b": true,
            "subject_to_income_tax": true
        }"#;

        let policy: PayRunPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.code, "BONUS");
        assert!(!policy.subject_to_fund_a);
        assert!(policy.subject_to_fund_b);
    }
}
