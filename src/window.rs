//! Analysis-window resolution.
//!
//! The window defaults to every full day the log can prove: analysis starts
//! the day after the first switching event (the first day whose opening
//! midnight status is known) and ends the day before the last logged
//! timestamp (the last day whose closing midnight lies inside the log).
//! Optional user bounds narrow or extend the window; bounds that do not
//! parse or do not fit fall back to the defaults with a warning rather than
//! aborting the run.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{DutylineError, Result};
use crate::model::Day;
use crate::parser::ParsedLog;

/// Inclusive range of analyzed days.
///
/// The window also fixes the boundary grid around those days: `num_days`
/// days are framed by `num_days + 1` midnight boundaries, from the midnight
/// opening `start` to the midnight closing `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWindow {
    /// First analyzed day.
    pub start: Day,
    /// Last analyzed day (inclusive).
    pub end: Day,
}

impl AnalysisWindow {
    /// Resolve the window for a parsed log, applying optional user bounds.
    ///
    /// Bounds are accepted as epoch seconds or `YYYY-MM-DD` and snap to the
    /// midnight of the day they fall on. A start bound is honored only if it
    /// lies strictly inside the default window; an end bound only if it
    /// leaves at least one full day after the start. Anything else keeps the
    /// default and logs a warning.
    ///
    /// # Errors
    ///
    /// Returns [`DutylineError::InsufficientData`] when the log does not
    /// span at least one full day after the first switching event. User
    /// bounds cannot cause this error; they are validated against it.
    pub fn resolve(
        log: &ParsedLog,
        start_arg: Option<&str>,
        end_arg: Option<&str>,
    ) -> Result<Self> {
        let first_event = log
            .first_event()
            .ok_or(DutylineError::InsufficientData { days: 0 })?;
        let extent = log
            .extent
            .ok_or(DutylineError::InsufficientData { days: 0 })?;

        let default_start = first_event.day().succ();
        let default_closing = extent.last_day();

        let full_days = default_closing.ordinal() - default_start.ordinal();
        if full_days < 1 {
            return Err(DutylineError::InsufficientData {
                days: full_days.max(0),
            });
        }

        let mut start = default_start;
        let mut closing = default_closing;

        if let Some(raw) = start_arg {
            match parse_bound(raw) {
                Some(day) if day == default_start => {
                    debug!(raw, "start bound matches the default window start");
                }
                Some(day) if day > default_start && day < default_closing => {
                    info!(raw, day = %day, "window start overridden");
                    start = day;
                }
                Some(day) => {
                    warn!(
                        raw,
                        requested = %day,
                        default = %default_start,
                        "start bound outside the analyzable range, using default"
                    );
                }
                None => {
                    warn!(raw, "could not parse start bound, using default");
                }
            }
        }

        if let Some(raw) = end_arg {
            match parse_bound(raw) {
                Some(day) if day > start => {
                    info!(raw, day = %day, "window end overridden");
                    closing = day;
                }
                Some(day) => {
                    warn!(
                        raw,
                        requested = %day,
                        "end bound does not leave a full day after the start, using default"
                    );
                }
                None => {
                    warn!(raw, "could not parse end bound, using default");
                }
            }
        }

        if closing > default_closing {
            warn!(
                requested = %closing,
                last_logged = %default_closing,
                "window end extends past the log; assuming no status changes in between"
            );
        }

        let window = Self {
            start,
            end: closing.pred(),
        };
        info!(
            start = %window.start,
            end = %window.end,
            days = window.num_days(),
            "analysis window resolved"
        );
        Ok(window)
    }

    /// Number of analyzed days.
    #[must_use]
    pub const fn num_days(&self) -> usize {
        (self.end.ordinal() - self.start.ordinal() + 1) as usize
    }

    /// The day whose opening midnight closes the window.
    #[must_use]
    pub const fn closing_boundary(&self) -> Day {
        self.end.succ()
    }

    /// Number of midnight boundaries framing the analyzed days.
    #[must_use]
    pub const fn boundary_count(&self) -> usize {
        self.num_days() + 1
    }

    /// Whether a day lies inside the window.
    #[must_use]
    pub fn contains(&self, day: Day) -> bool {
        day >= self.start && day <= self.end
    }

    /// Index of a day on the boundary grid `start..=closing`, `None` outside.
    #[must_use]
    pub fn boundary_index(&self, day: Day) -> Option<usize> {
        let offset = day.ordinal() - self.start.ordinal();
        if offset >= 0 && offset <= self.num_days() as i64 {
            Some(offset as usize)
        } else {
            None
        }
    }

    /// Iterate the analyzed days in order.
    pub fn days(&self) -> impl Iterator<Item = Day> {
        (self.start.ordinal()..=self.end.ordinal()).map(Day::from_ordinal)
    }
}

/// Parse a user-supplied bound: epoch seconds first, then `YYYY-MM-DD`.
fn parse_bound(raw: &str) -> Option<Day> {
    let raw = raw.trim();
    if let Ok(secs) = raw.parse::<i64>() {
        return Some(Day::from_timestamp(secs));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(Day::from_date)
}
