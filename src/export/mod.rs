//! Report emission for the daily analysis.
//!
//! One analysis run produces three artifacts, all named after the moment
//! the report was generated (`%Y%m%d_%H%M%S`, UTC):
//!
//! - `<stamp>_controller_analysis.csv`: the per-day table
//! - `<stamp>_controller_log_plot_bar.png`: bar chart of daily ON hours
//! - `<stamp>_controller_log_plot.png`: line chart of the same series
//!
//! CSV output goes through an atomic temp-file rename; charts render
//! through the plotters bitmap backend. Both charts carry the summary
//! headline as their title.

mod chart;
mod csv;

pub use chart::*;
pub use csv::*;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::model::{DailyRecord, Day};

/// Whole-window statistics derived from the daily records.
#[derive(Debug, Clone, Copy)]
pub struct Summary {
    /// Total ON time across the window, hours.
    pub total_on_hours: f64,
    /// Mean ON time per analyzed day, hours.
    pub mean_on_hours: f64,
    /// Highest daily ON time, hours.
    pub max_on_hours: f64,
    /// Day the maximum occurred; ties keep the earliest day.
    pub max_day: Day,
    /// Lowest daily ON time, hours.
    pub min_on_hours: f64,
    /// Number of analyzed days.
    pub days: usize,
}

impl Summary {
    /// Compute statistics over the records, `None` when there are none.
    ///
    /// The window resolver guarantees at least one analyzed day in normal
    /// operation, so `None` only arises from direct library misuse.
    #[must_use]
    pub fn from_records(records: &[DailyRecord]) -> Option<Self> {
        let first = records.first()?;
        let mut max = *first;
        let mut min = *first;
        for record in &records[1..] {
            if record.on_seconds > max.on_seconds {
                max = *record;
            }
            if record.on_seconds < min.on_seconds {
                min = *record;
            }
        }
        let total: f64 = records.iter().map(DailyRecord::on_hours).sum();
        Some(Self {
            total_on_hours: total,
            mean_on_hours: total / records.len() as f64,
            max_on_hours: max.on_hours(),
            max_day: max.day,
            min_on_hours: min.on_hours(),
            days: records.len(),
        })
    }

    /// Headline printed on stdout and used as the chart title.
    #[must_use]
    pub fn headline(&self) -> String {
        format!(
            "Total of {:.1} hours on in {} days (mean {:.2} hours/day)",
            self.total_on_hours, self.days, self.mean_on_hours
        )
    }

    /// Extremes line printed under the headline.
    #[must_use]
    pub fn extremes_line(&self) -> String {
        format!(
            "Max {:.1} hours in a day (on {}) and min {:.1} hours in a day",
            self.max_on_hours,
            self.max_day.compact(),
            self.min_on_hours
        )
    }
}

/// Artifact paths for one report run.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    /// Per-day CSV table.
    pub csv: PathBuf,
    /// Bar chart of daily ON hours.
    pub bar_chart: PathBuf,
    /// Line chart of daily ON hours.
    pub line_chart: PathBuf,
}

impl ReportPaths {
    /// Lay out the artifact paths inside `output_dir`.
    #[must_use]
    pub fn new(output_dir: &Path, generated_at: &DateTime<Utc>) -> Self {
        let stamp = generated_at.format("%Y%m%d_%H%M%S").to_string();
        Self {
            csv: output_dir.join(format!("{stamp}_controller_analysis.csv")),
            bar_chart: output_dir.join(format!("{stamp}_controller_log_plot_bar.png")),
            line_chart: output_dir.join(format!("{stamp}_controller_log_plot.png")),
        }
    }
}
