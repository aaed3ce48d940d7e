//! Compensation line item model.
//!
//! A line item is one row of a pay period: a gain (salary, bonus, allowance,
//! benefit in kind) or a deduction taken either from gross or from net pay.
//! Which contribution and tax bases it feeds is carried by explicit flags.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::round_currency;

/// Where a deduction is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionSource {
    /// Taken from gross pay; reduces every contribution and tax base.
    Gross,
    /// Taken from net pay after contributions and tax.
    Net,
}

/// Whether a line item adds to or subtracts from pay.
///
/// Serialized as `"gain"` or `{"deduction": "gross" | "net"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    /// Adds to gross pay.
    Gain,
    /// Subtracts from pay at the given stage.
    Deduction(DeductionSource),
}

/// One row of a pay period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CompensationLineItem, LineItemKind};
/// use rust_decimal::Decimal;
///
/// let housing = CompensationLineItem::gain("HOUSING", Decimal::new(1500000, 2))
///     .with_income_tax()
///     .as_benefit_in_kind();
///
/// assert_eq!(housing.kind, LineItemKind::Gain);
/// assert!(housing.affects_income_tax);
/// assert!(!housing.affects_social_fund_a);
/// assert!(housing.is_benefit_in_kind);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationLineItem {
    /// The pay element code (e.g. "BASE_SALARY", "TRANSPORT").
    pub code: String,
    /// Gain or deduction.
    pub kind: LineItemKind,
    /// The unit amount the element was priced from.
    pub base_amount: Decimal,
    /// The number of units.
    pub quantity: Decimal,
    /// The amount used by the engine, with two decimals.
    pub calculated_amount: Decimal,
    /// Feeds the fund-A (CNSS) contribution base.
    #[serde(default)]
    pub affects_social_fund_a: bool,
    /// Feeds the fund-B (CNAM) contribution base.
    #[serde(default)]
    pub affects_social_fund_b: bool,
    /// Feeds the income tax (ITS) base.
    #[serde(default)]
    pub affects_income_tax: bool,
    /// Non-cash compensation, removed again when deriving net salary.
    #[serde(default)]
    pub is_benefit_in_kind: bool,
}

impl CompensationLineItem {
    /// Creates a line item priced as `base_amount × quantity`, rounded to cents.
    ///
    /// All base flags start cleared.
    pub fn priced(
        code: impl Into<String>,
        kind: LineItemKind,
        base_amount: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            code: code.into(),
            kind,
            base_amount,
            quantity,
            calculated_amount: round_currency(base_amount * quantity),
            affects_social_fund_a: false,
            affects_social_fund_b: false,
            affects_income_tax: false,
            is_benefit_in_kind: false,
        }
    }

    /// Creates a gain of a flat amount.
    pub fn gain(code: impl Into<String>, amount: Decimal) -> Self {
        Self::priced(code, LineItemKind::Gain, amount, Decimal::ONE)
    }

    /// Creates a deduction of a flat amount taken from the given stage.
    pub fn deduction(code: impl Into<String>, source: DeductionSource, amount: Decimal) -> Self {
        Self::priced(code, LineItemKind::Deduction(source), amount, Decimal::ONE)
    }

    /// Marks the item as feeding the fund-A base.
    pub fn with_fund_a(mut self) -> Self {
        self.affects_social_fund_a = true;
        self
    }

    /// Marks the item as feeding the fund-B base.
    pub fn with_fund_b(mut self) -> Self {
        self.affects_social_fund_b = true;
        self
    }

    /// Marks the item as feeding the income tax base.
    pub fn with_income_tax(mut self) -> Self {
        self.affects_income_tax = true;
        self
    }

    /// Marks the item as feeding all three bases.
    pub fn subject_to_all(self) -> Self {
        self.with_fund_a().with_fund_b().with_income_tax()
    }

    /// Marks the item as a benefit in kind.
    pub fn as_benefit_in_kind(mut self) -> Self {
        self.is_benefit_in_kind = true;
        self
    }

    /// Returns true if the item is a gain.
    pub fn is_gain(&self) -> bool {
        self.kind == LineItemKind::Gain
    }

    /// Returns the deduction source, or `None` for gains.
    pub fn deduction_source(&self) -> Option<DeductionSource> {
        match self.kind {
            LineItemKind::Gain => None,
            LineItemKind::Deduction(source) => Some(source),
        }
    }
}
