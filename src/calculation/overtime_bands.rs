//! Overtime premium banding.
//!
//! ## Band Structure
//!
//! Overtime hours beyond the period's standard threshold are consumed band by band:
//! - Band 1: first 8 hours at 115%
//! - Band 2: next 6 hours at 140%
//! - Band 3: remaining hours at 150%
//!
//! Holiday overtime (band 4, 200%) is computed separately and never chained.
//! Each band's amount is rounded to cents on its own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

use super::money::round_currency;

/// Maximum hours paid in band 1.
pub const OVERTIME_BAND_1_MAX_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Maximum hours paid in band 2.
pub const OVERTIME_BAND_2_MAX_HOURS: Decimal = Decimal::from_parts(6, 0, 0, false, 0);

/// Band 1 multiplier (115%).
pub const OVERTIME_BAND_1_MULTIPLIER: Decimal = Decimal::from_parts(115, 0, 0, false, 2);

/// Band 2 multiplier (140%).
pub const OVERTIME_BAND_2_MULTIPLIER: Decimal = Decimal::from_parts(140, 0, 0, false, 2);

/// Band 3 multiplier (150%).
pub const OVERTIME_BAND_3_MULTIPLIER: Decimal = Decimal::from_parts(150, 0, 0, false, 2);

/// Holiday overtime multiplier (200%).
pub const HOLIDAY_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(200, 0, 0, false, 2);

/// One band of overtime pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeBand {
    /// Band number: 1–3, or 4 for holiday overtime.
    pub band: u8,
    /// Hours paid in this band.
    pub hours: Decimal,
    /// The hourly base rate.
    pub hourly_rate: Decimal,
    /// The premium multiplier.
    pub multiplier: Decimal,
    /// `hours × hourly_rate × multiplier`, rounded half-up to cents.
    pub amount: Decimal,
}

impl OvertimeBand {
    fn priced(band: u8, hours: Decimal, hourly_rate: Decimal, multiplier: Decimal) -> Self {
        Self {
            band,
            hours,
            hourly_rate,
            multiplier,
            amount: round_currency(hours * hourly_rate * multiplier),
        }
    }
}

/// The result of overtime banding.
#[derive(Debug, Clone)]
pub struct OvertimeResult {
    /// Always three bands, in order; unused bands carry zero hours.
    pub bands: Vec<OvertimeBand>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl OvertimeResult {
    /// Sum of the rounded band amounts.
    pub fn total_amount(&self) -> Decimal {
        self.bands.iter().map(|b| b.amount).sum()
    }
}

/// Splits overtime hours into the three chained bands.
///
/// Negative hours are treated as zero.
pub fn split_overtime_hours(overtime_hours: Decimal) -> [Decimal; 3] {
    let remaining = overtime_hours.max(Decimal::ZERO);
    let band1 = remaining.min(OVERTIME_BAND_1_MAX_HOURS);
    let remaining = remaining - band1;
    let band2 = remaining.min(OVERTIME_BAND_2_MAX_HOURS);
    let band3 = remaining - band2;
    [band1, band2, band3]
}

/// Calculates banded overtime pay.
///
/// # Arguments
///
/// * `overtime_hours` - Total hours beyond the standard threshold for the period
/// * `hourly_rate` - The hourly base rate
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_overtime;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let result = calculate_overtime(dec("14"), dec("500.00"), 1);
///
/// assert_eq!(result.bands[0].amount, dec("4600.00"));
/// assert_eq!(result.bands[1].amount, dec("4200.00"));
/// assert_eq!(result.bands[2].amount, dec("0"));
/// ```
pub fn calculate_overtime(
    overtime_hours: Decimal,
    hourly_rate: Decimal,
    step_number: u32,
) -> OvertimeResult {
    let [band1, band2, band3] = split_overtime_hours(overtime_hours);
    let bands = vec![
        OvertimeBand::priced(1, band1, hourly_rate, OVERTIME_BAND_1_MULTIPLIER),
        OvertimeBand::priced(2, band2, hourly_rate, OVERTIME_BAND_2_MULTIPLIER),
        OvertimeBand::priced(3, band3, hourly_rate, OVERTIME_BAND_3_MULTIPLIER),
    ];

    let reasoning = bands
        .iter()
        .filter(|b| b.hours > Decimal::ZERO)
        .map(|b| {
            format!(
                "band {}: {} h x {} x {} = {}",
                b.band,
                b.hours.normalize(),
                b.hourly_rate,
                b.multiplier.normalize(),
                b.amount
            )
        })
        .collect::<Vec<_>>();
    let reasoning = if reasoning.is_empty() {
        "No overtime hours to pay".to_string()
    } else {
        reasoning.join("; ")
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_bands".to_string(),
        rule_name: "Overtime Premium Bands".to_string(),
        input: serde_json::json!({
            "overtime_hours": overtime_hours.normalize().to_string(),
            "hourly_rate": hourly_rate.to_string()
        }),
        output: serde_json::json!({
            "band_1": { "hours": band1.normalize().to_string(), "amount": bands[0].amount.to_string() },
            "band_2": { "hours": band2.normalize().to_string(), "amount": bands[1].amount.to_string() },
            "band_3": { "hours": band3.normalize().to_string(), "amount": bands[2].amount.to_string() }
        }),
        reasoning,
    };

    OvertimeResult { bands, audit_step }
}

/// Calculates holiday overtime pay (band 4), independent of the chained bands.
pub fn calculate_holiday_overtime(holiday_hours: Decimal, hourly_rate: Decimal) -> OvertimeBand {
    OvertimeBand::priced(
        4,
        holiday_hours.max(Decimal::ZERO),
        hourly_rate,
        HOLIDAY_OVERTIME_MULTIPLIER,
    )
}
