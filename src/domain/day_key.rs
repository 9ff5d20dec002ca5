//! Calendar-date key for daily quota counters.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar date keying a [`super::DailyCounter`].
///
/// Renders as `YYYY-MM-DD`. "Today" is the server-local date, matching
/// how the quota day rolls over for the board's operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Returns the key for the server-local current date.
    #[must_use]
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Creates a key from an explicit date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the inner date.
    #[must_use]
    pub const fn as_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn renders_iso_date() {
        let Some(date) = NaiveDate::from_ymd_opt(2026, 3, 7) else {
            panic!("valid date");
        };
        assert_eq!(DayKey::from_date(date).to_string(), "2026-03-07");
    }

    #[test]
    fn distinct_dates_are_distinct_keys() {
        let Some(a) = NaiveDate::from_ymd_opt(2026, 3, 7) else {
            panic!("valid date");
        };
        let Some(b) = NaiveDate::from_ymd_opt(2026, 3, 8) else {
            panic!("valid date");
        };
        assert_ne!(DayKey::from_date(a), DayKey::from_date(b));
    }
}
