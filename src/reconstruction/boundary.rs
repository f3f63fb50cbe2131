//! Midnight-boundary reconstruction.

use tracing::{debug, warn};

use crate::model::{BoundaryStatus, Day, LogEvent};
use crate::window::AnalysisWindow;

/// Controller status at every midnight framing the analysis window.
///
/// For `N` analyzed days there are `N + 1` boundaries: index `i` holds the
/// status at the midnight opening day `start + i`, and the final entry is
/// the window's closing boundary. A boundary that precedes the first
/// switching event stays [`BoundaryStatus::Unknown`]: status is never
/// inferred backwards from a later event, the gap is surfaced instead.
#[derive(Debug, Clone)]
pub struct Boundaries {
    window: AnalysisWindow,
    statuses: Vec<BoundaryStatus>,
    leading_unknown: usize,
    carried_forward_days: usize,
}

impl Boundaries {
    /// Replay chronologically sorted events across the window's midnight
    /// grid.
    ///
    /// Every midnight crossed between two events carries the status in
    /// force before the later event; midnights after the final event carry
    /// its status forward. Events outside the window still drive the state
    /// machine, only the recorded boundaries are clamped to the grid.
    #[must_use]
    pub fn reconstruct(window: AnalysisWindow, events: &[LogEvent]) -> Self {
        let mut statuses = vec![BoundaryStatus::Unknown; window.boundary_count()];
        let mut status = BoundaryStatus::Unknown;
        let mut prev_day: Option<Day> = None;

        for event in events {
            let day = event.day();
            if let Some(prev) = prev_day {
                if day > prev {
                    // Midnights crossed since the previous event carry the
                    // status that was in force before this one.
                    fill(&mut statuses, &window, prev.succ(), day, status);
                }
            }
            status = status.apply(event.kind);
            prev_day = Some(day);
        }

        // Boundaries past the last event carry its status forward.
        if let Some(prev) = prev_day {
            fill(
                &mut statuses,
                &window,
                prev.succ(),
                window.closing_boundary(),
                status,
            );
        }

        let leading_unknown = statuses.iter().take_while(|s| s.is_unknown()).count();
        if leading_unknown > 0 {
            warn!(
                boundaries = leading_unknown,
                "no switching event precedes the window start; leading boundaries stay unknown"
            );
        }

        let carried_forward_days = prev_day.map_or(0, |last| {
            usize::try_from((window.end.ordinal() - last.ordinal()).max(0)).unwrap_or(0)
        });
        if carried_forward_days > 0 {
            warn!(
                days = carried_forward_days,
                "analysis window extends past the last switching event; carrying its status forward"
            );
        }

        debug!(
            boundaries = statuses.len(),
            leading_unknown, carried_forward_days, "boundaries reconstructed"
        );

        Self {
            window,
            statuses,
            leading_unknown,
            carried_forward_days,
        }
    }

    /// Status at the midnight opening `day`, `Unknown` outside the grid.
    #[must_use]
    pub fn day_start_status(&self, day: Day) -> BoundaryStatus {
        self.window
            .boundary_index(day)
            .map_or(BoundaryStatus::Unknown, |i| self.statuses[i])
    }

    /// Status at the midnight closing `day`.
    #[must_use]
    pub fn day_end_status(&self, day: Day) -> BoundaryStatus {
        self.day_start_status(day.succ())
    }

    /// All boundary statuses, one per midnight `start..=closing`.
    #[must_use]
    pub fn statuses(&self) -> &[BoundaryStatus] {
        &self.statuses
    }

    /// Boundaries before the first event that remained unknown.
    #[must_use]
    pub const fn leading_unknown(&self) -> usize {
        self.leading_unknown
    }

    /// Analyzed days lying wholly after the last switching event.
    #[must_use]
    pub const fn carried_forward_days(&self) -> usize {
        self.carried_forward_days
    }

    /// The window the boundaries were reconstructed for.
    #[must_use]
    pub const fn window(&self) -> &AnalysisWindow {
        &self.window
    }
}

/// Record `status` at every midnight in `from..=to` that lies on the grid.
fn fill(
    statuses: &mut [BoundaryStatus],
    window: &AnalysisWindow,
    from: Day,
    to: Day,
    status: BoundaryStatus,
) {
    let grid_start = window.start.ordinal();
    let lo = from.ordinal().max(grid_start);
    let hi = to.ordinal().min(window.closing_boundary().ordinal());
    for ordinal in lo..=hi {
        statuses[usize::try_from(ordinal - grid_start).unwrap_or(0)] = status;
    }
}
