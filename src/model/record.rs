//! Per-day aggregation records.

use super::day::Day;

/// Accumulated ON-time for one day of the analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRecord {
    /// The day this record covers.
    pub day: Day,
    /// Seconds the output was on, in `0..=86400`.
    pub on_seconds: i64,
}

impl DailyRecord {
    /// Create a record.
    #[must_use]
    pub const fn new(day: Day, on_seconds: i64) -> Self {
        Self { day, on_seconds }
    }

    /// Hours the output was on.
    #[must_use]
    pub fn on_hours(&self) -> f64 {
        self.on_seconds as f64 / 3600.0
    }

    /// Percentage of the day the output was on.
    #[must_use]
    pub fn duty_cycle_percent(&self) -> f64 {
        self.on_seconds as f64 / 864.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::day::SECONDS_PER_DAY;

    #[test]
    fn test_half_day() {
        let record = DailyRecord::new(Day::from_ordinal(0), 43_200);
        assert!((record.on_hours() - 12.0).abs() < f64::EPSILON);
        assert!((record.duty_cycle_percent() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_day() {
        let record = DailyRecord::new(Day::from_ordinal(0), SECONDS_PER_DAY);
        assert!((record.on_hours() - 24.0).abs() < f64::EPSILON);
        assert!((record.duty_cycle_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_day() {
        let record = DailyRecord::new(Day::from_ordinal(0), 0);
        assert!(record.on_hours().abs() < f64::EPSILON);
        assert!(record.duty_cycle_percent().abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_second_resolution() {
        let record = DailyRecord::new(Day::from_ordinal(0), 1);
        assert!((record.duty_cycle_percent() - 1.0 / 864.0).abs() < f64::EPSILON);
    }
}
