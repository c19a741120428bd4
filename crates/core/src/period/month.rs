//! Calendar month keys (`"YYYY-MM"`).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors raised when parsing month keys, transaction dates and period filters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Month key is not `YYYY-MM` or the month is outside 01-12.
    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    /// Date is neither RFC 3339 nor `YYYY-MM-DD`.
    #[error("Invalid date format")]
    InvalidDate(String),

    /// Unknown dashboard period filter.
    #[error("invalid period '{0}', expected this-month, last-month or all")]
    InvalidFilter(String),
}

/// Years a month key can hold.
const MONTH_KEY_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// A calendar month, used to match transactions against budgets.
///
/// Always derived in UTC. Serialized as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates a month key.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidMonth` if `month` is outside 1..=12 or the
    /// year does not fit four digits.
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) || !MONTH_KEY_YEARS.contains(&year) {
            return Err(PeriodError::InvalidMonth(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Month containing the given instant, in UTC.
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    /// Month containing the given calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Year component.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month component (1-12).
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// The following month; December rolls over to January of the next year.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidMonth` past `9999-12`.
    pub fn next(self) -> Result<Self, PeriodError> {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// The preceding month; January rolls back to December of the previous year.
    #[must_use]
    pub const fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Returns true if the instant falls in this month (UTC).
    #[must_use]
    pub fn contains(self, at: DateTime<Utc>) -> bool {
        Self::from_datetime(at) == self
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PeriodError::InvalidMonth(s.to_string());

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !digits(year) || !digits(month) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses a transaction date.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates, the latter taken
/// as UTC midnight. The UTC year must fit a month key.
///
/// # Errors
///
/// Returns `PeriodError::InvalidDate` for anything else.
pub fn parse_transaction_date(raw: &str) -> Result<DateTime<Utc>, PeriodError> {
    let raw = raw.trim();

    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
        .filter(|at| MONTH_KEY_YEARS.contains(&at.year()))
        .ok_or_else(|| PeriodError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("2025-06", 2025, 6)]
    #[case("1999-12", 1999, 12)]
    #[case(" 2024-01 ", 2024, 1)]
    fn test_parse_valid(#[case] raw: &str, #[case] year: i32, #[case] month: u32) {
        let key: MonthKey = raw.parse().unwrap();
        assert_eq!(key.year(), year);
        assert_eq!(key.month(), month);
    }

    #[rstest]
    #[case("2025-13")]
    #[case("2025-00")]
    #[case("2025-6")]
    #[case("25-06")]
    #[case("2025/06")]
    #[case("")]
    #[case("abcd-ef")]
    #[case("2025-+6")]
    fn test_parse_invalid(#[case] raw: &str) {
        assert!(matches!(
            raw.parse::<MonthKey>(),
            Err(PeriodError::InvalidMonth(_))
        ));
    }

    #[test]
    fn test_next_rolls_december() {
        let dec: MonthKey = "2025-12".parse().unwrap();
        assert_eq!(dec.next().unwrap().to_string(), "2026-01");

        let jun: MonthKey = "2025-06".parse().unwrap();
        assert_eq!(jun.next().unwrap().to_string(), "2025-07");
    }

    #[test]
    fn test_next_stops_at_last_key() {
        let last: MonthKey = "9999-12".parse().unwrap();
        assert!(matches!(last.next(), Err(PeriodError::InvalidMonth(_))));
    }

    #[test]
    fn test_previous_rolls_january() {
        let jan: MonthKey = "2025-01".parse().unwrap();
        assert_eq!(jan.previous().to_string(), "2024-12");
    }

    #[test]
    fn test_date_only_is_utc_midnight() {
        let at = parse_transaction_date("2025-06-10").unwrap();
        assert_eq!(at.to_rfc3339(), "2025-06-10T00:00:00+00:00");
        assert_eq!(MonthKey::from_datetime(at).to_string(), "2025-06");
    }

    #[test]
    fn test_month_uses_utc_not_offset() {
        // 1 July 02:00 in UTC+7 is still 30 June in UTC.
        let at = parse_transaction_date("2025-07-01T02:00:00+07:00").unwrap();
        assert_eq!(MonthKey::from_datetime(at).to_string(), "2025-06");
    }

    #[test]
    fn test_invalid_date() {
        assert!(matches!(
            parse_transaction_date("10/06/2025"),
            Err(PeriodError::InvalidDate(_))
        ));
        assert!(parse_transaction_date("2025-02-30").is_err());
    }

    #[rstest]
    #[case("+12345-06-10")]
    #[case("+12345-06-10T00:00:00Z")]
    #[case("-0001-06-10")]
    fn test_date_outside_month_key_years(#[case] raw: &str) {
        assert!(matches!(
            parse_transaction_date(raw),
            Err(PeriodError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_last_representable_date() {
        let at = parse_transaction_date("9999-12-31T23:59:59Z").unwrap();
        assert_eq!(MonthKey::from_datetime(at).to_string(), "9999-12");
    }

    #[test]
    fn test_serde_as_string() {
        let key: MonthKey = "2025-06".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&key).unwrap_or_default(),
            "\"2025-06\""
        );
    }

    proptest! {
        #[test]
        fn prop_next_then_previous(year in 1900i32..2200, month in 1u32..=12) {
            let key = MonthKey::new(year, month).unwrap();
            let next = key.next().unwrap();
            prop_assert_eq!(next.previous(), key);
            prop_assert!(next > key);
        }
    }
}
