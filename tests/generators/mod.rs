//! Synthetic controller log generators.
//!
//! This module provides utilities for generating controller logs with
//! known switching schedules for testing purposes.

// Shared across several test binaries; not every binary uses every helper.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::io::Write;

/// Configuration for generating synthetic controller logs.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Number of full analyzable days after the first event day.
    pub days: usize,
    /// ON/OFF cycles per day (at most 4 fit the schedule).
    pub cycles_per_day: usize,
    /// Interleave diagnostic lines around switching events.
    pub include_diagnostics: bool,
    /// Interleave dash-separated status snapshot lines.
    pub include_snapshots: bool,
    /// Midnight of the first event day.
    pub first_day: DateTime<Utc>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            days: 3,
            cycles_per_day: 2,
            include_diagnostics: true,
            include_snapshots: false,
            first_day: Utc.with_ymd_and_hms(2020, 1, 4, 0, 0, 0).unwrap(),
        }
    }
}

impl LogConfig {
    /// Create a minimal log config (small, fast generation).
    pub fn minimal() -> Self {
        Self {
            days: 2,
            cycles_per_day: 1,
            include_diagnostics: false,
            include_snapshots: false,
            ..Default::default()
        }
    }

    /// Create a config covering a full week with both line layouts.
    pub fn week() -> Self {
        Self {
            days: 7,
            cycles_per_day: 3,
            include_diagnostics: true,
            include_snapshots: true,
            ..Default::default()
        }
    }

    /// ON seconds every full day in the schedule accumulates.
    ///
    /// Each cycle holds the system ON for two hours.
    pub fn expected_daily_seconds(&self) -> i64 {
        self.cycles_per_day.min(4) as i64 * 7_200
    }
}

/// Generate a synthetic controller log and write it to a writer.
///
/// The first event day establishes the pre-window status; every following
/// day runs `cycles_per_day` two-hour ON cycles starting at 06:00. A final
/// diagnostic line just after the last midnight closes the log's coverage,
/// so the default analysis window spans exactly `days` days.
pub fn generate_log<W: Write>(config: &LogConfig, writer: &mut W) -> std::io::Result<()> {
    let cycles = config.cycles_per_day.min(4);
    let mut reading = 0usize;

    for day in 0..=config.days {
        let midnight = config.first_day + Duration::days(day as i64);

        if config.include_snapshots {
            write_snapshot(writer, midnight + Duration::minutes(1), 0, reading)?;
        }

        for cycle in 0..cycles {
            let on_at = midnight + Duration::hours(6 + 4 * cycle as i64);
            let off_at = on_at + Duration::hours(2);

            if config.include_diagnostics {
                write_diagnostic(
                    writer,
                    on_at - Duration::seconds(30),
                    "Demand required, checking if system is on",
                )?;
            }
            write_switch(writer, on_at, true, reading)?;
            reading += 1;

            if config.include_diagnostics {
                write_diagnostic(writer, off_at - Duration::seconds(30), "Temperature OK")?;
            }
            write_switch(writer, off_at, false, reading)?;
            reading += 1;
        }
    }

    // Closing coverage line so the last full day ends at a recorded midnight.
    let closing = config.first_day + Duration::days(config.days as i64 + 1);
    write_diagnostic(writer, closing + Duration::seconds(5), "Temperature OK")
}

/// Generate a log of status snapshots only, with no switching events.
pub fn generate_snapshot_log<W: Write>(
    config: &LogConfig,
    writer: &mut W,
) -> std::io::Result<()> {
    for day in 0..=config.days {
        let midnight = config.first_day + Duration::days(day as i64);
        for hour in (0..24).step_by(6) {
            write_snapshot(writer, midnight + Duration::hours(hour), 0, day + hour as usize)?;
        }
    }
    Ok(())
}

fn write_switch<W: Write>(
    writer: &mut W,
    at: DateTime<Utc>,
    on: bool,
    reading: usize,
) -> std::io::Result<()> {
    let marker = if on {
        "Switching system on"
    } else {
        "Switching system off"
    };
    writeln!(
        writer,
        "{}: Setpoint={}, Actual={} - {}",
        at.format("%Y-%m-%d-%H:%M:%S"),
        setpoint(reading),
        actual(reading),
        marker
    )
}

fn write_diagnostic<W: Write>(
    writer: &mut W,
    at: DateTime<Utc>,
    message: &str,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "{}: DEBUG: {}",
        at.format("%Y-%m-%d-%H:%M:%S"),
        message
    )
}

fn write_snapshot<W: Write>(
    writer: &mut W,
    at: DateTime<Utc>,
    status: u8,
    reading: usize,
) -> std::io::Result<()> {
    // The controller's dash-separated layout carries a trailing space.
    writeln!(
        writer,
        "{} {} Setpoint: {} Actual: {} Status: {} ",
        at.format("%Y-%m-%d-%H-%M-%S"),
        at.timestamp(),
        setpoint(reading),
        actual(reading),
        status
    )
}

// Helper functions for generating realistic readings

fn setpoint(_reading: usize) -> &'static str {
    "21.0"
}

fn actual(reading: usize) -> &'static str {
    const TEMPS: [&str; 6] = ["19.4", "19.9", "20.3", "20.8", "21.2", "18.9"];
    TEMPS[reading % TEMPS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_minimal_log() {
        let config = LogConfig::minimal();
        let mut buffer = Vec::new();
        generate_log(&config, &mut buffer).unwrap();

        let content = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        // 3 event days of one ON and one OFF line, plus the closing line
        assert_eq!(lines.len(), 7);
        assert!(content.contains("Switching system on"));
        assert!(content.contains("Switching system off"));
    }

    #[test]
    fn test_generate_log_with_diagnostics() {
        let config = LogConfig {
            days: 1,
            cycles_per_day: 1,
            include_diagnostics: true,
            ..Default::default()
        };
        let mut buffer = Vec::new();
        generate_log(&config, &mut buffer).unwrap();

        let content = String::from_utf8(buffer).unwrap();
        assert!(content.contains("DEBUG:"));
    }

    #[test]
    fn test_generate_log_with_snapshots() {
        let config = LogConfig::week();
        let mut buffer = Vec::new();
        generate_log(&config, &mut buffer).unwrap();

        let content = String::from_utf8(buffer).unwrap();
        assert!(content.contains("Status: 0"));
    }

    #[test]
    fn test_snapshot_log_has_no_events() {
        let config = LogConfig::minimal();
        let mut buffer = Vec::new();
        generate_snapshot_log(&config, &mut buffer).unwrap();

        let content = String::from_utf8(buffer).unwrap();
        assert!(!content.contains("Switching system"));
        assert!(!content.is_empty());
    }
}
