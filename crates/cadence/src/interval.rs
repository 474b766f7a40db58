//! Canonical recurrence intervals and the average-duration estimator.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::{CadenceError, CadenceResult};
use crate::unit::Unit;

/// A canonical recurrence interval: a non-negative count per unit.
///
/// Built once from a user-supplied specification and immutable afterward.
/// An all-zero interval is legal and yields a degenerate rule that only
/// ever produces its start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interval {
    pub seconds: u32,
    pub minutes: u32,
    pub hours: u32,
    pub days: u32,
    pub weeks: u32,
    pub months: u32,
    pub quarters: u32,
    pub years: u32,
}

impl Interval {
    /// ## Summary
    /// Normalizes a specification of `(unit token, count)` pairs into a
    /// canonical interval.
    ///
    /// Keys may mix long names (`"months"`) and shorthand tokens (`"M"`);
    /// unspecified units default to zero. If the same unit is given more
    /// than once, the last value wins.
    ///
    /// ## Errors
    /// Returns `CadenceError::InvalidArgument` if a key does not name a
    /// known unit or a count is negative.
    pub fn from_spec<'a, I>(spec: I) -> CadenceResult<Self>
    where
        I: IntoIterator<Item = (&'a str, i64)>,
    {
        let mut interval = Self::default();
        for (key, count) in spec {
            let unit = Unit::parse(key).ok_or_else(|| {
                CadenceError::InvalidArgument(format!("unrecognized interval unit `{key}`"))
            })?;
            let count = u32::try_from(count).map_err(|_e| {
                CadenceError::InvalidArgument(format!(
                    "count for `{key}` must be a non-negative integer, got {count}"
                ))
            })?;
            interval.set(unit, count);
        }
        Ok(interval)
    }

    fn set(&mut self, unit: Unit, count: u32) {
        match unit {
            Unit::Second => self.seconds = count,
            Unit::Minute => self.minutes = count,
            Unit::Hour => self.hours = count,
            Unit::Day => self.days = count,
            Unit::Week => self.weeks = count,
            Unit::Month => self.months = count,
            Unit::Quarter => self.quarters = count,
            Unit::Year => self.years = count,
        }
    }

    /// The count for one unit.
    #[must_use]
    pub const fn count(&self, unit: Unit) -> u32 {
        match unit {
            Unit::Second => self.seconds,
            Unit::Minute => self.minutes,
            Unit::Hour => self.hours,
            Unit::Day => self.days,
            Unit::Week => self.weeks,
            Unit::Month => self.months,
            Unit::Quarter => self.quarters,
            Unit::Year => self.years,
        }
    }

    /// Whether every unit count is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        Unit::ALL.iter().all(|&unit| self.count(unit) == 0)
    }

    /// ## Summary
    /// Estimates the typical duration of one interval cycle, in
    /// milliseconds.
    ///
    /// The sum over all units of count times the unit's duration, using
    /// the long-run Gregorian average for month, quarter, and year. An
    /// approximation by construction: a `{months: 1}` rule does not
    /// advance by a fixed number of days each step. Used to seed
    /// occurrence index estimates, never to place exact dates.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "Millisecond totals here are far below 2^52; the estimate is approximate anyway"
    )]
    pub fn average_millis(&self) -> f64 {
        Unit::ALL
            .iter()
            .map(|&unit| i64::from(self.count(unit)) * unit.average_millis())
            .sum::<i64>() as f64
    }

    /// Calendar months advanced per occurrence step, with quarters and
    /// years folded in.
    pub(crate) fn months_per_step(&self) -> i64 {
        i64::from(self.months) + 3 * i64::from(self.quarters) + 12 * i64::from(self.years)
    }

    /// Exact fixed-duration seconds advanced per occurrence step
    /// (seconds through weeks).
    pub(crate) fn seconds_per_step(&self) -> i64 {
        i64::from(self.seconds)
            + 60 * i64::from(self.minutes)
            + 3_600 * i64::from(self.hours)
            + 86_400 * i64::from(self.days)
            + 604_800 * i64::from(self.weeks)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for unit in Unit::ALL {
            let count = self.count(unit);
            if count > 0 {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{count}{}", unit.shorthand())?;
                first = false;
            }
        }
        if first {
            f.write_str("0")?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SpecVisitor;

        impl<'de> Visitor<'de> for SpecVisitor {
            type Value = Interval;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of interval unit names to non-negative integer counts")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Interval, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut interval = Interval::default();
                while let Some((key, count)) = map.next_entry::<String, i64>()? {
                    let unit = Unit::parse(&key).ok_or_else(|| {
                        de::Error::custom(format!("unrecognized interval unit `{key}`"))
                    })?;
                    let count = u32::try_from(count).map_err(|_e| {
                        de::Error::custom(format!(
                            "count for `{key}` must be a non-negative integer"
                        ))
                    })?;
                    interval.set(unit, count);
                }
                Ok(interval)
            }
        }

        deserializer.deserialize_map(SpecVisitor)
    }
}
