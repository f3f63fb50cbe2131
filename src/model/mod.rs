//! Core data model for controller-log analysis.
//!
//! This module defines the domain types shared across the crate:
//!
//! - [`Day`]: opaque days-since-epoch ordinal keying all per-day data
//! - [`LogEvent`] / [`EventKind`]: switching events extracted from the log
//! - [`BoundaryStatus`]: the Unknown/On/Off state machine driven by events
//! - [`LogExtent`]: earliest/latest parseable timestamps in the log
//! - [`DailyRecord`]: accumulated ON-time for one analyzed day

pub mod day;
pub mod event;
pub mod record;

pub use day::*;
pub use event::*;
pub use record::*;
