//! Cadence - occurrence computation for repeating calendar events.
//!
//! A [`RecurrenceRule`] pairs a timezone-anchored start instant with a
//! mixed-unit repetition [`Interval`] and answers three queries: the
//! `i`-th occurrence, the first `n` occurrences, and every occurrence
//! inside an arbitrary `[from, to)` window. Occurrences are placed with
//! calendar-aware addition (month lengths, leap years, day clamping), so
//! a monthly rule lands on month boundaries instead of drifting by a
//! fixed number of days. Range queries far from the start are served by
//! an average-duration estimate that seeds the search near the window
//! and is then corrected against exact occurrences.
//!
//! Calendar and timezone primitives come from `chrono` and `chrono-tz`;
//! this crate only orchestrates them.

pub mod error;
pub mod interval;
pub mod rule;
pub mod timezone;
pub mod unit;

pub use error::{CadenceError, CadenceResult};
pub use interval::Interval;
pub use rule::{RecurrenceRule, to_system_times};
pub use unit::Unit;
