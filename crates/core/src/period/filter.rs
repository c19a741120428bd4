//! Dashboard period filter.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::month::{MonthKey, PeriodError};

/// Which transactions a dashboard request looks at, relative to "now".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodFilter {
    /// The current UTC month.
    #[default]
    ThisMonth,
    /// The month before the current one.
    LastMonth,
    /// No date restriction.
    All,
}

impl PeriodFilter {
    /// The month this filter selects, or `None` for [`PeriodFilter::All`].
    #[must_use]
    pub fn month(self, now: DateTime<Utc>) -> Option<MonthKey> {
        let current = MonthKey::from_datetime(now);
        match self {
            Self::ThisMonth => Some(current),
            Self::LastMonth => Some(current.previous()),
            Self::All => None,
        }
    }

    /// Returns true if `at` falls inside the filtered period.
    #[must_use]
    pub fn includes(self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.month(now).is_none_or(|month| month.contains(at))
    }
}

impl FromStr for PeriodFilter {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "this-month" => Ok(Self::ThisMonth),
            "last-month" => Ok(Self::LastMonth),
            "all" => Ok(Self::All),
            other => Err(PeriodError::InvalidFilter(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_last_month_in_january_is_previous_december() {
        let now = at(2025, 1, 15);
        assert_eq!(
            PeriodFilter::LastMonth.month(now).map(|m| m.to_string()),
            Some("2024-12".to_string())
        );
        assert!(PeriodFilter::LastMonth.includes(at(2024, 12, 31), now));
        assert!(!PeriodFilter::LastMonth.includes(at(2025, 1, 2), now));
    }

    #[test]
    fn test_all_includes_everything() {
        let now = at(2025, 6, 1);
        assert!(PeriodFilter::All.includes(at(1999, 3, 3), now));
        assert_eq!(PeriodFilter::All.month(now), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("this-month".parse(), Ok(PeriodFilter::ThisMonth));
        assert_eq!("all".parse(), Ok(PeriodFilter::All));
        assert!("bulan-ini".parse::<PeriodFilter>().is_err());
    }
}
