//! Switching events and the controller state machine.

use chrono::{DateTime, Utc};

use super::day::Day;

/// Marker substring identifying a switch-on line.
pub const ON_MARKER: &str = "Switching system on";

/// Marker substring identifying a switch-off line.
pub const OFF_MARKER: &str = "Switching system off";

/// The transition a switching line records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Output switched on.
    On,
    /// Output switched off.
    Off,
}

/// A single switching event extracted from the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEvent {
    /// Instant the controller switched, second resolution, UTC.
    pub timestamp: DateTime<Utc>,
    /// Direction of the transition.
    pub kind: EventKind,
}

impl LogEvent {
    /// Create an event.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }

    /// Epoch seconds of the event instant.
    #[must_use]
    pub const fn epoch_seconds(&self) -> i64 {
        self.timestamp.timestamp()
    }

    /// Calendar day the event falls on.
    #[must_use]
    pub const fn day(&self) -> Day {
        Day::from_timestamp(self.epoch_seconds())
    }
}

/// Controller state at a midnight boundary or during replay.
///
/// `Unknown` holds until the first event establishes a state; any event
/// moves the machine to a known state, and it never returns to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryStatus {
    /// No event has established a state yet.
    #[default]
    Unknown,
    /// Output active.
    On,
    /// Output inactive.
    Off,
}

impl BoundaryStatus {
    /// Advance the state machine by one event.
    ///
    /// Duplicate transitions (an `On` event while already on, or `Off`
    /// while already off) land on the same state and are no-ops.
    #[must_use]
    pub const fn apply(self, kind: EventKind) -> Self {
        match kind {
            EventKind::On => Self::On,
            EventKind::Off => Self::Off,
        }
    }

    /// True only for `On`; `Unknown` never counts as on.
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// True while no event has been seen.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

/// Earliest and latest parseable timestamps observed in the log.
///
/// Every line with a valid timestamp widens the extent, whether or not it
/// carries a switching marker; the window resolver anchors its defaults on
/// these bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogExtent {
    /// Earliest timestamp on any parseable line.
    pub earliest: DateTime<Utc>,
    /// Latest timestamp on any parseable line.
    pub latest: DateTime<Utc>,
}

impl LogExtent {
    /// Extent covering a single instant.
    #[must_use]
    pub const fn new(ts: DateTime<Utc>) -> Self {
        Self {
            earliest: ts,
            latest: ts,
        }
    }

    /// Widen the extent to include another instant.
    pub fn extend(&mut self, ts: DateTime<Utc>) {
        if ts < self.earliest {
            self.earliest = ts;
        }
        if ts > self.latest {
            self.latest = ts;
        }
    }

    /// Day of the latest parseable line.
    #[must_use]
    pub fn last_day(&self) -> Day {
        Day::from_datetime(&self.latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_status_transitions() {
        let status = BoundaryStatus::Unknown;
        assert!(status.is_unknown());
        assert!(!status.is_on());

        let status = status.apply(EventKind::On);
        assert_eq!(status, BoundaryStatus::On);
        assert!(status.is_on());

        let status = status.apply(EventKind::Off);
        assert_eq!(status, BoundaryStatus::Off);
        assert!(!status.is_on());
    }

    #[test]
    fn test_duplicate_transitions_are_noops() {
        let on = BoundaryStatus::On;
        assert_eq!(on.apply(EventKind::On), BoundaryStatus::On);

        let off = BoundaryStatus::Off;
        assert_eq!(off.apply(EventKind::Off), BoundaryStatus::Off);
    }

    #[test]
    fn test_unknown_resolves_on_first_event() {
        assert_eq!(
            BoundaryStatus::Unknown.apply(EventKind::Off),
            BoundaryStatus::Off
        );
        assert_eq!(
            BoundaryStatus::Unknown.apply(EventKind::On),
            BoundaryStatus::On
        );
    }

    #[test]
    fn test_event_day() {
        // 2020-01-05 06:58:11 UTC
        let event = LogEvent::new(ts(1_578_207_491), EventKind::On);
        assert_eq!(event.day().to_string(), "2020-01-05");
    }

    #[test]
    fn test_extent_widens_both_ways() {
        let mut extent = LogExtent::new(ts(1_000_000));
        extent.extend(ts(500_000));
        extent.extend(ts(2_000_000));
        extent.extend(ts(1_500_000));
        assert_eq!(extent.earliest, ts(500_000));
        assert_eq!(extent.latest, ts(2_000_000));
    }
}
