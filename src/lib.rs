//! dutyline: reconstruct per-day ON time from a temperature controller log.
//!
//! A heating controller appends a line to its log every time it switches
//! the system on or off, plus periodic diagnostic lines. This crate reads
//! such a log after the fact and answers one question per calendar day:
//! how long was the system ON? The catch is that the log only records
//! transitions, so days without any switching activity inherit their
//! status from the most recent event, and the status at each midnight has
//! to be reconstructed before any day can be scored.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dutyline::parser::LogParser;
//! use dutyline::reconstruction::{Aggregation, Boundaries};
//! use dutyline::window::AnalysisWindow;
//!
//! fn main() -> dutyline::Result<()> {
//!     let parsed = LogParser::new().parse_file("/var/log/control_temp.log")?;
//!     let window = AnalysisWindow::resolve(&parsed, None, None)?;
//!     let boundaries = Boundaries::reconstruct(window, &parsed.events);
//!     let aggregation = Aggregation::compute(&window, &boundaries, &parsed.events);
//!
//!     for record in aggregation.records() {
//!         println!("{}: {:.2} hours", record.day, record.on_hours());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`model`]: Core data structures (days, switching events, daily records)
//! - [`parser`]: Controller log parsing with skip-and-continue error recovery
//! - [`window`]: Analysis window resolution from log coverage and user bounds
//! - [`reconstruction`]: Midnight boundary statuses and per-day aggregation
//! - [`export`]: Report output (summary lines, CSV table, charts)
//! - [`cli`]: Command-line interface
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`util`]: Atomic file writing

#![doc(html_root_url = "https://docs.rs/dutyline/0.1.0")]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod reconstruction;
pub mod util;
pub mod window;

// Re-export commonly used types at the crate root
pub use error::{DutylineError, Result};
pub use model::{BoundaryStatus, DailyRecord, Day, LogEvent};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Log file analysed when neither the CLI nor the config names one.
pub const DEFAULT_LOG_PATH: &str = "/var/log/control_temp.log";

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{DutylineError, Result};
    pub use crate::export::{CsvExporter, Summary};
    pub use crate::model::{BoundaryStatus, DailyRecord, Day, EventKind, LogEvent};
    pub use crate::parser::LogParser;
    pub use crate::reconstruction::{Aggregation, Boundaries};
    pub use crate::window::AnalysisWindow;
}
