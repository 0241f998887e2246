use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{MortgageError, Result};
use crate::types::DayCountConvention;

/// calendar day count for `month` (1-12) of `year`
///
/// The last day of a month is the day before the first of the next month, so leap
/// years follow the Gregorian rule. Months outside 1-12 count 30 days.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last_day| last_day.day())
        .unwrap_or(30)
}

/// calendar label of a payment period
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeriodCursor {
    pub year: i32,
    pub month: u32,
}

impl PeriodCursor {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(MortgageError::InvalidStartPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    /// period containing the given instant
    pub fn from_date(date: DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// move to the next month, rolling over into the next year after December
    pub fn advance(&mut self) {
        self.month += 1;
        if self.month > 12 {
            self.month = 1;
            self.year += 1;
        }
    }

    pub fn calendar_days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// days of interest accrual for this period under `convention`
    pub fn accrual_days(&self, convention: DayCountConvention) -> u32 {
        match convention {
            DayCountConvention::Thirty360 => 30,
            DayCountConvention::Actual365 => self.calendar_days(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_cursor_rollover() {
        let mut cursor = PeriodCursor::new(2024, 11).unwrap();
        cursor.advance();
        assert_eq!(cursor, PeriodCursor { year: 2024, month: 12 });
        cursor.advance();
        assert_eq!(cursor, PeriodCursor { year: 2025, month: 1 });
    }

    #[test]
    fn test_cursor_rejects_bad_month() {
        assert!(PeriodCursor::new(2024, 0).is_err());
        assert!(PeriodCursor::new(2024, 13).is_err());
    }

    #[test]
    fn test_cursor_from_date() {
        let date = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        assert_eq!(PeriodCursor::from_date(date), PeriodCursor { year: 2026, month: 10 });
    }

    #[test]
    fn test_accrual_days() {
        let feb = PeriodCursor::new(2024, 2).unwrap();
        assert_eq!(feb.accrual_days(DayCountConvention::Thirty360), 30);
        assert_eq!(feb.accrual_days(DayCountConvention::Actual365), 29);
    }
}
