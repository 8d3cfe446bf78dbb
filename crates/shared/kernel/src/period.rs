//! The date range a report covers.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

const LABEL_FORMAT: &str = "%B %d, %Y";
const DEFAULT_SPAN_DAYS: u64 = 7;

#[recap_derive::recap_error]
pub enum PeriodError {
    #[error("End date must be after start date{}: {start} .. {end}", format_context(.context))]
    Inverted { start: NaiveDate, end: NaiveDate, context: Option<Cow<'static, str>> },

    #[error("Date out of range{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Inclusive calendar range; `start` is strictly before `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportPeriod {
    /// # Errors
    /// [`PeriodError::Inverted`] unless `start < end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start >= end {
            return Err(PeriodError::Inverted { start, end, context: None });
        }
        Ok(Self { start, end })
    }

    /// The week ending on `today`.
    ///
    /// # Errors
    /// Only for dates at the edge of the calendar.
    pub fn last_week(today: NaiveDate) -> Result<Self, PeriodError> {
        let start = today
            .checked_sub_days(Days::new(DEFAULT_SPAN_DAYS))
            .ok_or("Cannot step back a week from the given date")?;
        Self::new(start, today)
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, both ends included.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Human label, e.g. `October 05, 2026 to October 12, 2026`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} to {}", self.start.format(LABEL_FORMAT), self.end.format(LABEL_FORMAT))
    }

    /// Exclusive upper bound for daily price queries.
    #[must_use]
    pub fn query_end(&self) -> NaiveDate {
        self.end.succ_opt().unwrap_or(self.end)
    }

    /// Midnight UTC at the start of the period.
    #[must_use]
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// Midnight UTC right after the last day.
    #[must_use]
    pub fn query_end_utc(&self) -> DateTime<Utc> {
        self.query_end().and_time(chrono::NaiveTime::MIN).and_utc()
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl<'de> Deserialize<'de> for ReportPeriod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            start: NaiveDate,
            end: NaiveDate,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_equal_and_inverted_ranges() {
        let day = date(2026, 10, 12);
        assert!(matches!(ReportPeriod::new(day, day), Err(PeriodError::Inverted { .. })));
        assert!(ReportPeriod::new(date(2026, 10, 13), day).is_err());
        let err = ReportPeriod::new(day, day).unwrap_err();
        assert!(err.to_string().starts_with("End date must be after start date"));
    }

    #[test]
    fn counts_both_ends() {
        let period = ReportPeriod::new(date(2026, 10, 5), date(2026, 10, 12)).unwrap();
        assert_eq!(period.days(), 8);
        assert_eq!(period.query_end(), date(2026, 10, 13));
    }

    #[test]
    fn label_uses_long_month_names() {
        let period = ReportPeriod::new(date(2026, 10, 5), date(2026, 10, 12)).unwrap();
        assert_eq!(period.label(), "October 05, 2026 to October 12, 2026");
    }

    #[test]
    fn last_week_spans_seven_days_back() {
        let period = ReportPeriod::last_week(date(2026, 3, 3)).unwrap();
        assert_eq!(period.start(), date(2026, 2, 24));
        assert_eq!(period.end(), date(2026, 3, 3));
    }

    #[test]
    fn utc_bounds_are_midnight() {
        let period = ReportPeriod::new(date(2026, 1, 1), date(2026, 1, 2)).unwrap();
        assert_eq!(period.start_utc().timestamp(), 1_767_225_600);
        assert_eq!(period.query_end_utc().timestamp(), 1_767_225_600 + 2 * 86_400);
    }

    #[test]
    fn deserialization_enforces_order() {
        let ok: ReportPeriod =
            serde_json::from_str(r#"{"start":"2026-01-01","end":"2026-01-08"}"#).unwrap();
        assert_eq!(ok.days(), 8);
        let inverted = r#"{"start":"2026-01-08","end":"2026-01-01"}"#;
        assert!(serde_json::from_str::<ReportPeriod>(inverted).is_err());
    }

    proptest! {
        #[test]
        fn days_is_difference_plus_one(offset in 0i64..20_000, span in 1i64..400) {
            let start = date(1990, 1, 1) + chrono::Duration::days(offset);
            let end = start + chrono::Duration::days(span);
            let period = ReportPeriod::new(start, end).unwrap();
            prop_assert_eq!(period.days(), span + 1);
        }
    }
}
