//! Reporting windows and derived figures for usage statistics.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, TimeZone, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Days counted as "recent" activity.
pub const RECENT_DAYS: i64 = 7;

/// Look-back window for usage analytics (`?period=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UsagePeriod {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl UsagePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Length of the window. A month is 30 days, a year 365.
    pub fn span(&self) -> Duration {
        match self {
            Self::Day => Duration::days(1),
            Self::Week => Duration::weeks(1),
            Self::Month => Duration::days(30),
            Self::Year => Duration::days(365),
        }
    }

    /// Start of the window ending at `now`.
    pub fn start(&self, now: Timestamp) -> Timestamp {
        now - self.span()
    }
}

impl fmt::Display for UsagePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UsagePeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(CoreError::Validation(
                "Invalid period. Must be one of: day, week, month, year".to_string(),
            )),
        }
    }
}

/// Midnight UTC, [`RECENT_DAYS`] days before `now`'s date.
pub fn recent_window_start(now: Timestamp) -> Timestamp {
    midnight(now) - Duration::days(RECENT_DAYS)
}

/// Midnight UTC on the first day of `now`'s month.
pub fn month_start(now: Timestamp) -> Timestamp {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or_else(|| midnight(now))
}

fn midnight(now: Timestamp) -> Timestamp {
    now.date_naive().and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Ideas per day since the first idea, rounded to two decimals.
///
/// At least one day is assumed so a fresh garden does not divide by zero.
pub fn average_per_day(total: i64, first_created: Option<Timestamp>, now: Timestamp) -> f64 {
    let days = first_created
        .map(|first| (now - first).num_days())
        .unwrap_or(1)
        .max(1);
    (total as f64 / days as f64 * 100.0).round() / 100.0
}

/// `positive` when anything was planted recently, otherwise `stable`.
pub fn growth_rate(recent: i64) -> &'static str {
    if recent > 0 {
        "positive"
    } else {
        "stable"
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn period_parses_and_defaults_to_month() {
        assert_eq!("Week".parse::<UsagePeriod>().unwrap(), UsagePeriod::Week);
        assert_eq!(UsagePeriod::default(), UsagePeriod::Month);
        assert_matches!("decade".parse::<UsagePeriod>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn period_start_subtracts_span() {
        let now = at(2025, 3, 31, 12);
        assert_eq!(UsagePeriod::Month.start(now), at(2025, 3, 1, 12));
        assert_eq!(UsagePeriod::Day.start(now), at(2025, 3, 30, 12));
    }

    #[test]
    fn windows_start_at_midnight() {
        let now = at(2025, 3, 10, 15);
        assert_eq!(recent_window_start(now), at(2025, 3, 3, 0));
        assert_eq!(month_start(now), at(2025, 3, 1, 0));
    }

    #[test]
    fn average_uses_at_least_one_day() {
        let now = at(2025, 3, 10, 15);
        assert_eq!(average_per_day(3, None, now), 3.0);
        assert_eq!(average_per_day(3, Some(at(2025, 3, 10, 9)), now), 3.0);
        assert_eq!(average_per_day(10, Some(at(2025, 3, 7, 15)), now), 3.33);
    }

    #[test]
    fn growth_rate_reflects_recent_activity() {
        assert_eq!(growth_rate(0), "stable");
        assert_eq!(growth_rate(2), "positive");
    }
}
