//! Daily ON-time aggregation.

use tracing::{debug, error};

use crate::model::{BoundaryStatus, DailyRecord, Day, LogEvent, SECONDS_PER_DAY};
use crate::window::AnalysisWindow;

use super::Boundaries;

/// Per-day ON-time for the whole analysis window.
#[derive(Debug, Clone)]
pub struct Aggregation {
    records: Vec<DailyRecord>,
    inconsistent_days: Vec<Day>,
}

impl Aggregation {
    /// Replay each analyzed day from its opening boundary status.
    ///
    /// Days without events contribute a full day when the boundary says On
    /// and nothing otherwise. Days with events accumulate the On intervals
    /// between transitions; the replayed end-of-day status is checked
    /// against the reconstructed boundary and a disagreement is logged and
    /// flagged, with the replayed value kept.
    #[must_use]
    pub fn compute(window: &AnalysisWindow, boundaries: &Boundaries, events: &[LogEvent]) -> Self {
        let mut records = Vec::with_capacity(window.num_days());
        let mut inconsistent_days = Vec::new();
        let mut cursor = 0;

        for day in window.days() {
            let day_start = day.midnight();
            let day_end = day_start + SECONDS_PER_DAY;

            while cursor < events.len() && events[cursor].epoch_seconds() < day_start {
                cursor += 1;
            }
            let begin = cursor;
            while cursor < events.len() && events[cursor].epoch_seconds() < day_end {
                cursor += 1;
            }
            let day_events = &events[begin..cursor];

            let opening = boundaries.day_start_status(day);
            let (on_seconds, closing) = replay_day(day_start, day_end, opening, day_events);

            if !day_events.is_empty() {
                let expected = boundaries.day_end_status(day);
                if closing != expected && !expected.is_unknown() {
                    error!(
                        day = %day,
                        replayed = ?closing,
                        boundary = ?expected,
                        "end-of-day status disagrees with the reconstructed boundary, keeping the replayed value"
                    );
                    inconsistent_days.push(day);
                }
            }

            records.push(DailyRecord::new(day, on_seconds));
        }

        debug!(
            days = records.len(),
            inconsistent = inconsistent_days.len(),
            "daily aggregation complete"
        );

        Self {
            records,
            inconsistent_days,
        }
    }

    /// Records in window order, one per analyzed day.
    #[must_use]
    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    /// Consume the aggregation, keeping only the records.
    #[must_use]
    pub fn into_records(self) -> Vec<DailyRecord> {
        self.records
    }

    /// Days whose replayed end-of-day status disagreed with the boundary.
    #[must_use]
    pub fn inconsistent_days(&self) -> &[Day] {
        &self.inconsistent_days
    }
}

/// Replay one day's events from its opening status.
///
/// Returns the accumulated On seconds and the status at the day's end.
fn replay_day(
    day_start: i64,
    day_end: i64,
    opening: BoundaryStatus,
    events: &[LogEvent],
) -> (i64, BoundaryStatus) {
    let mut status = opening;
    let mut on_since = if status.is_on() { Some(day_start) } else { None };
    let mut on_seconds = 0;

    for event in events {
        let next = status.apply(event.kind);
        if next == status {
            continue; // duplicate transition
        }
        let at = event.epoch_seconds();
        match (status.is_on(), next.is_on()) {
            (false, true) => on_since = Some(at),
            (true, false) => {
                if let Some(since) = on_since.take() {
                    on_seconds += at - since;
                }
            }
            _ => {} // Unknown -> Off: state resolves without accumulation
        }
        status = next;
    }

    if let Some(since) = on_since {
        on_seconds += day_end - since;
    }

    (on_seconds, status)
}
