//! Controller-log parsing with malformed-line tolerance.
//!
//! Log lines start with a 19-character timestamp in one of two historical
//! layouts, tried in a fixed order:
//!
//! 1. `%Y-%m-%d-%H:%M:%S` (current firmware)
//! 2. `%Y-%m-%d-%H-%M-%S` (legacy firmware)
//!
//! Lines whose timestamp parses and that carry a switching marker become
//! [`LogEvent`]s. Timestamped lines without a marker (setpoint samples,
//! diagnostics) still anchor the log's time extent. Lines with no parseable
//! timestamp are skipped and counted, never fatal.
//!
//! # Example
//!
//! ```rust
//! use dutyline::parser::LogParser;
//!
//! let parser = LogParser::new();
//! let log = parser.parse_str(
//!     "2020-01-05-06:58:11: Setpoint=21.0, Actual=19.4 - Switching system on\n",
//! )?;
//! assert_eq!(log.events.len(), 1);
//! println!("Timestamped: {:.1}%", log.stats.success_rate());
//! # Ok::<(), dutyline::DutylineError>(())
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, instrument, trace, warn};

use crate::error::{DutylineError, Result};
use crate::model::{EventKind, LogEvent, LogExtent, OFF_MARKER, ON_MARKER};

/// Timestamp layouts accepted at the start of a line, in priority order.
/// The first layout that parses wins; both cover exactly 19 characters.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d-%H:%M:%S", "%Y-%m-%d-%H-%M-%S"];

/// Width of the timestamp prefix both layouts occupy.
const TIMESTAMP_WIDTH: usize = 19;

/// Statistics about a parsing operation.
#[derive(Debug, Clone, Default)]
pub struct ParseStats {
    /// Total lines processed.
    pub lines_processed: usize,
    /// Lines that produced a switching event.
    pub events_parsed: usize,
    /// Timestamped lines without a switching marker.
    pub anchor_lines: usize,
    /// Lines with no parseable timestamp.
    pub lines_skipped: usize,
    /// Empty lines.
    pub empty_lines: usize,
    /// Skip reasons encountered.
    pub errors: Vec<ParseError>,
}

impl ParseStats {
    /// Percentage of non-empty lines that carried a parseable timestamp.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        let considered = self.lines_processed - self.empty_lines;
        if considered == 0 {
            return 100.0;
        }
        ((self.events_parsed + self.anchor_lines) as f64 / considered as f64) * 100.0
    }
}

/// A skipped line with context.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Line number where the skip occurred (1-indexed).
    pub line: usize,
    /// Why the line was skipped.
    pub message: String,
    /// Original line content (truncated).
    pub content_preview: String,
}

/// Everything extracted from one pass over a log.
#[derive(Debug, Clone, Default)]
pub struct ParsedLog {
    /// Switching events in chronological order.
    pub events: Vec<LogEvent>,
    /// Earliest/latest parseable timestamps, `None` if no line parsed.
    pub extent: Option<LogExtent>,
    /// Line accounting for the pass.
    pub stats: ParseStats,
}

impl ParsedLog {
    /// Whether any switching event was found.
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// First event in chronological order.
    #[must_use]
    pub fn first_event(&self) -> Option<&LogEvent> {
        self.events.first()
    }

    /// Last event in chronological order.
    #[must_use]
    pub fn last_event(&self) -> Option<&LogEvent> {
        self.events.last()
    }
}

/// How one line classified during the scan.
enum ParsedLine {
    /// Timestamped line carrying a switching marker.
    Event(LogEvent),
    /// Timestamped line without a marker.
    Anchor(DateTime<Utc>),
}

/// Parser for controller logs.
#[derive(Debug, Clone, Default)]
pub struct LogParser;

impl LogParser {
    /// Create a new parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse a log file from disk.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParsedLog> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DutylineError::FileNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => DutylineError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => DutylineError::io(format!("failed to open {}", path.display()), e),
        })?;

        self.parse_reader(BufReader::new(file))
    }

    /// Parse log content from any buffered reader.
    pub fn parse_reader<R: Read>(&self, reader: BufReader<R>) -> Result<ParsedLog> {
        let mut parsed = ParsedLog::default();

        for (line_number, line) in reader.lines().enumerate() {
            let line_number = line_number + 1; // 1-indexed for humans
            let line = line
                .map_err(|e| DutylineError::io(format!("read error at line {line_number}"), e))?;

            parsed.stats.lines_processed += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                parsed.stats.empty_lines += 1;
                continue;
            }

            match parse_line(trimmed) {
                Ok(ParsedLine::Event(event)) => {
                    trace!(line_number, kind = ?event.kind, "parsed switching event");
                    record_extent(&mut parsed.extent, event.timestamp);
                    parsed.events.push(event);
                    parsed.stats.events_parsed += 1;
                }
                Ok(ParsedLine::Anchor(ts)) => {
                    record_extent(&mut parsed.extent, ts);
                    parsed.stats.anchor_lines += 1;
                }
                Err(message) => {
                    warn!(line_number, %message, "skipping unparseable line");
                    parsed.stats.errors.push(ParseError {
                        line: line_number,
                        message,
                        content_preview: preview(trimmed),
                    });
                    parsed.stats.lines_skipped += 1;
                }
            }
        }

        // File order is usually chronological already; a stable sort keeps
        // same-second events in their original order either way.
        parsed.events.sort_by_key(LogEvent::epoch_seconds);

        debug!(
            lines = parsed.stats.lines_processed,
            events = parsed.stats.events_parsed,
            anchors = parsed.stats.anchor_lines,
            skipped = parsed.stats.lines_skipped,
            "parse complete"
        );

        Ok(parsed)
    }

    /// Parse log content from a string.
    pub fn parse_str(&self, content: &str) -> Result<ParsedLog> {
        self.parse_reader(BufReader::new(content.as_bytes()))
    }
}

/// Classify one non-empty line.
fn parse_line(line: &str) -> std::result::Result<ParsedLine, String> {
    let prefix = line
        .get(..TIMESTAMP_WIDTH)
        .ok_or_else(|| format!("line shorter than {TIMESTAMP_WIDTH}-character timestamp"))?;

    let timestamp = parse_timestamp(prefix)
        .ok_or_else(|| format!("unrecognized timestamp prefix: {prefix:?}"))?;

    if line.contains(ON_MARKER) {
        Ok(ParsedLine::Event(LogEvent::new(timestamp, EventKind::On)))
    } else if line.contains(OFF_MARKER) {
        Ok(ParsedLine::Event(LogEvent::new(timestamp, EventKind::Off)))
    } else {
        Ok(ParsedLine::Anchor(timestamp))
    }
}

/// Try each accepted layout against a 19-character prefix.
fn parse_timestamp(prefix: &str) -> Option<DateTime<Utc>> {
    TIMESTAMP_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(prefix, format)
            .ok()
            .map(|naive| naive.and_utc())
    })
}

fn record_extent(extent: &mut Option<LogExtent>, ts: DateTime<Utc>) {
    match extent {
        Some(e) => e.extend(ts),
        None => *extent = Some(LogExtent::new(ts)),
    }
}

fn preview(line: &str) -> String {
    line.chars().take(80).collect()
}
