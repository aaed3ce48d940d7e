//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type identifying the month a pay run
//! covers. Its start date selects the effective rate configuration.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Represents a pay period with its inclusive date range.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::month(2025, 2).unwrap();
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 2, 14).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates the calendar-month period for the given year and month.
    ///
    /// Returns `None` if the month is not in `1..=12`.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start_date = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let end_date = next_month.pred_opt()?;
        Some(Self {
            start_date,
            end_date,
        })
    }

    /// Checks if a given date falls within this pay period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns a `YYYY-MM` label for the month the period starts in.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.start_date.year(), self.start_date.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_month_covers_whole_calendar_month() {
        let period = PayPeriod::month(2025, 1).unwrap();
        assert_eq!(period.start_date, make_date(2025, 1, 1));
        assert_eq!(period.end_date, make_date(2025, 1, 31));
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let period = PayPeriod::month(2025, 12).unwrap();
        assert_eq!(period.end_date, make_date(2025, 12, 31));
    }

    #[test]
    fn test_leap_february() {
        let period = PayPeriod::month(2024, 2).unwrap();
        assert_eq!(period.end_date, make_date(2024, 2, 29));
    }

    #[test]
    fn test_invalid_month_returns_none() {
        assert!(PayPeriod::month(2025, 13).is_none());
        assert!(PayPeriod::month(2025, 0).is_none());
    }

    #[test]
    fn test_contains_date_is_inclusive() {
        let period = PayPeriod::month(2025, 3).unwrap();
        assert!(period.contains_date(make_date(2025, 3, 1)));
        assert!(period.contains_date(make_date(2025, 3, 31)));
        assert!(!period.contains_date(make_date(2025, 2, 28)));
        assert!(!period.contains_date(make_date(2025, 4, 1)));
    }

    #[test]
    fn test_label() {
        assert_eq!(PayPeriod::month(2025, 7).unwrap().label(), "2025-07");
    }

    #[test]
    fn test_pay_period_serialization() {
        let period = PayPeriod::month(2025, 5).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        let deserialized: PayPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(period, deserialized);
    }
}
