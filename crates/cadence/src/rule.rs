//! Recurrence rules: exact occurrence generation and range queries.

use std::time::SystemTime;

use chrono::{DateTime, Months, TimeDelta};
use chrono_tz::Tz;

use crate::error::{CadenceError, CadenceResult};
use crate::interval::Interval;
use crate::timezone;

/// A repeating calendar event: a timezone-anchored start instant plus a
/// mixed-unit repetition interval.
///
/// Immutable after construction; every query is a pure function of the
/// rule and its arguments. Occurrence `i` is the start instant advanced
/// by `i` interval cycles using calendar-aware addition, so a monthly
/// rule tracks month boundaries instead of drifting by a fixed number of
/// days.
#[derive(Debug, Clone)]
pub struct RecurrenceRule {
    start: DateTime<Tz>,
    interval: Interval,
    tz: Tz,
}

impl RecurrenceRule {
    /// ## Summary
    /// Builds a rule from a start date literal, a canonical interval, and
    /// an IANA timezone name.
    ///
    /// The start literal is parsed as local time in the declared zone;
    /// see [`crate::timezone::parse_local`] for the accepted forms.
    ///
    /// ## Errors
    /// Returns `CadenceError::InvalidTimezone` for an unrecognized zone
    /// name and `CadenceError::InvalidDate` for a start that is not a
    /// resolvable calendar date.
    pub fn new(start: &str, interval: Interval, timezone: &str) -> CadenceResult<Self> {
        let tz = timezone::resolve(timezone)?;
        let start = timezone::parse_local(start, tz)?;

        Ok(Self {
            start,
            interval,
            tz,
        })
    }

    /// The rule's start instant; always equal to `occurrence(0)`.
    #[must_use]
    pub const fn start(&self) -> DateTime<Tz> {
        self.start
    }

    /// The rule's canonical interval.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// The rule's timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    /// ## Summary
    /// Computes the exact instant of occurrence `i`.
    ///
    /// All unit counts are scaled by `i` and applied as one calendar
    /// addition: the calendar-variable part (months, with quarters and
    /// years folded in) goes through month addition with end-of-day
    /// clamping exactly once, then the fixed-duration part is added as an
    /// exact offset. Scaling before adding keeps clamping from
    /// compounding: five steps of one month from January 31 is the single
    /// addition of five months, not five successive clamped additions.
    ///
    /// Monotonically non-decreasing in `i`. Occurrence 0 is the start
    /// instant itself.
    ///
    /// ## Errors
    /// Returns `CadenceError::OutOfRange` if the scaled addition leaves
    /// the representable calendar range.
    pub fn occurrence(&self, i: u32) -> CadenceResult<DateTime<Tz>> {
        self.occurrence_at(i64::from(i))
    }

    /// ## Summary
    /// Computes the first `n` occurrences, in order, starting at the
    /// rule's start instant.
    ///
    /// `first(0)` is empty.
    ///
    /// ## Errors
    /// Returns `CadenceError::OutOfRange` if an occurrence leaves the
    /// representable calendar range.
    pub fn first(&self, n: usize) -> CadenceResult<Vec<DateTime<Tz>>> {
        let mut occurrences = Vec::with_capacity(n);
        for i in 0..n {
            let index = i64::try_from(i).map_err(|_e| {
                CadenceError::OutOfRange(format!("occurrence index {i} is too large"))
            })?;
            occurrences.push(self.occurrence_at(index)?);
        }

        Ok(occurrences)
    }

    /// ## Summary
    /// Returns every occurrence inside `[from, to)`, in ascending order.
    ///
    /// Both bounds are parsed as local time in the rule's timezone.
    ///
    /// ## Errors
    /// Returns `CadenceError::InvalidDate` if a bound does not parse and
    /// `CadenceError::OutOfRange` if the walk leaves the representable
    /// calendar range.
    pub fn between(&self, from: &str, to: &str) -> CadenceResult<Vec<DateTime<Tz>>> {
        let from = timezone::parse_local(from, self.tz)?;
        let to = timezone::parse_local(to, self.tz)?;

        self.between_instants(from, to)
    }

    /// ## Summary
    /// Returns every occurrence inside `[from, to)`, in ascending order.
    ///
    /// Runs in two phases so that a window far from the rule's start does
    /// not require iterating from index 0: the interval's average
    /// duration seeds an index estimate near `from`, a linear walk
    /// corrects the estimate to the true first occurrence in the window
    /// (calendar-variable units make real spacing non-uniform, so the
    /// seed can land on either side), and exact generation enumerates
    /// forward until `to`. The result is identical to filtering a full
    /// enumeration from index 0.
    ///
    /// A window ending before the start, or an inverted window, yields an
    /// empty sequence. The rule produces nothing before its start: a
    /// `from` earlier than the start clamps to occurrence 0.
    ///
    /// ## Errors
    /// Returns `CadenceError::OutOfRange` if the walk leaves the
    /// representable calendar range.
    pub fn between_instants(
        &self,
        from: DateTime<Tz>,
        to: DateTime<Tz>,
    ) -> CadenceResult<Vec<DateTime<Tz>>> {
        if to <= from {
            return Ok(Vec::new());
        }

        let avg = self.interval.average_millis();
        if self.interval.is_zero() {
            // Degenerate rule: the start instant is the only occurrence.
            if from <= self.start && self.start < to {
                return Ok(vec![self.start]);
            }
            return Ok(Vec::new());
        }

        let mut k = self.estimate_index(from, avg);
        tracing::trace!(seed = k, avg_millis = avg, "Seeded index estimate for range query");

        // Correct the estimate to the smallest k with occurrence(k) >= from.
        // Exactly one of these walks moves, depending on which side of
        // `from` the seed landed.
        while k > 0 && self.occurrence_at(k - 1)? >= from {
            k -= 1;
        }
        while self.occurrence_at(k)? < from {
            k += 1;
        }
        tracing::trace!(index = k, "Corrected to first occurrence inside window");

        let mut occurrences = Vec::new();
        loop {
            let occurrence = self.occurrence_at(k)?;
            if occurrence >= to {
                break;
            }
            occurrences.push(occurrence);
            k += 1;
        }

        Ok(occurrences)
    }

    /// Seeds the range query with `round((from - start) / avg)`, clamped
    /// to index 0. Purely an estimate; never affects which occurrences
    /// are returned.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        reason = "The seed is a heuristic; the correction walk restores exactness"
    )]
    fn estimate_index(&self, from: DateTime<Tz>, avg: f64) -> i64 {
        let elapsed = (from - self.start).num_milliseconds() as f64;
        let estimate = (elapsed / avg).round() as i64;

        estimate.max(0)
    }

    fn occurrence_at(&self, i: i64) -> CadenceResult<DateTime<Tz>> {
        let out_of_range =
            || CadenceError::OutOfRange(format!("occurrence {i} cannot be placed on the calendar"));

        let months = i
            .checked_mul(self.interval.months_per_step())
            .and_then(|total| u32::try_from(total).ok())
            .ok_or_else(out_of_range)?;
        let seconds = i
            .checked_mul(self.interval.seconds_per_step())
            .ok_or_else(out_of_range)?;
        let delta = TimeDelta::try_seconds(seconds).ok_or_else(out_of_range)?;

        self.start
            .checked_add_months(Months::new(months))
            .and_then(|dt| dt.checked_add_signed(delta))
            .ok_or_else(out_of_range)
    }
}

/// Converts occurrences to the platform's native time representation.
#[must_use]
pub fn to_system_times(occurrences: &[DateTime<Tz>]) -> Vec<SystemTime> {
    occurrences.iter().map(|&dt| SystemTime::from(dt)).collect()
}
