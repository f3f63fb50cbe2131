//! Status reconstruction from the event stream.
//!
//! This module handles:
//! - Replaying sorted switching events across the window's midnight grid
//! - Filling day-rollover gaps with the status in force before each event
//! - Carrying the final event's status forward to unreached boundaries
//! - Surfacing boundaries before the first event as unknown, never guessed
//! - Accumulating per-day ON-time by replaying each day from its boundary

mod boundary;
mod daily;

pub use boundary::*;
pub use daily::*;
