//! Calendar-day ordinal used as the aggregation key.
//!
//! Boundary reconstruction and daily aggregation index everything by `Day`,
//! an opaque days-since-epoch ordinal. Conversion to a calendar date happens
//! only at the reporting boundary, keeping the core logic free of
//! locale/format coupling.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

/// Seconds in one UTC calendar day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// A UTC calendar day, identified by its midnight instant.
///
/// Stored as the number of days since the Unix epoch, so day arithmetic and
/// window indexing are plain integer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(i64);

impl Day {
    /// Create a day from its days-since-epoch ordinal.
    #[must_use]
    pub const fn from_ordinal(days: i64) -> Self {
        Self(days)
    }

    /// The days-since-epoch ordinal.
    #[must_use]
    pub const fn ordinal(self) -> i64 {
        self.0
    }

    /// The day containing the given epoch-seconds instant.
    #[must_use]
    pub const fn from_timestamp(secs: i64) -> Self {
        Self(secs.div_euclid(SECONDS_PER_DAY))
    }

    /// The day containing the given instant.
    #[must_use]
    pub fn from_datetime(ts: &DateTime<Utc>) -> Self {
        Self::from_timestamp(ts.timestamp())
    }

    /// The day for a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // NaiveDate::default() is 1970-01-01
        Self(date.signed_duration_since(NaiveDate::default()).num_days())
    }

    /// Epoch seconds of this day's midnight (its identifying instant).
    #[must_use]
    pub const fn midnight(self) -> i64 {
        self.0 * SECONDS_PER_DAY
    }

    /// The following day.
    #[must_use]
    pub const fn succ(self) -> Self {
        Self(self.0 + 1)
    }

    /// The preceding day.
    #[must_use]
    pub const fn pred(self) -> Self {
        Self(self.0 - 1)
    }

    /// Calendar date for this day, `None` if the ordinal falls outside
    /// chrono's representable range.
    #[must_use]
    pub fn date(self) -> Option<NaiveDate> {
        TimeDelta::try_days(self.0).and_then(|delta| NaiveDate::default().checked_add_signed(delta))
    }

    /// Compact `YYYYMMDD` form used in CSV rows and summary lines.
    #[must_use]
    pub fn compact(self) -> String {
        self.date()
            .map_or_else(|| format!("day#{}", self.0), |d| d.format("%Y%m%d").to_string())
    }

    /// `DD/MM/YYYY` form used in CSV rows.
    #[must_use]
    pub fn day_month_year(self) -> String {
        self.date()
            .map_or_else(|| format!("day#{}", self.0), |d| d.format("%d/%m/%Y").to_string())
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date() {
            Some(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            None => write!(f, "day#{}", self.0),
        }
    }
}
