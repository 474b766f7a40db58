//! Interval units and their fixed or averaged durations.

use std::fmt;

/// Average Gregorian month length (365.2425 days / 12) in milliseconds.
///
/// Calendar-variable units have no exact duration; this average exists so
/// that a span of real time can be converted into an occurrence index
/// estimate. Exact placement always goes through calendar addition.
pub const AVERAGE_MONTH_MILLIS: i64 = 2_629_746_000;

/// A recognized interval unit.
///
/// Fixed-duration units (second through week) have an exact constant
/// length. Calendar-variable units (month, quarter, year) only have a
/// well-defined average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Unit {
    /// Every unit, smallest first.
    pub const ALL: [Self; 8] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Quarter,
        Self::Year,
    ];

    /// Parses a long unit name or shorthand token (case-sensitive).
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "seconds" | "s" => Some(Self::Second),
            "minutes" | "m" => Some(Self::Minute),
            "hours" | "h" => Some(Self::Hour),
            "days" | "d" => Some(Self::Day),
            "weeks" | "w" => Some(Self::Week),
            "months" | "M" => Some(Self::Month),
            "quarters" | "Q" => Some(Self::Quarter),
            "years" | "y" => Some(Self::Year),
            _ => None,
        }
    }

    /// The canonical long name, e.g. `"months"`.
    #[must_use]
    pub const fn long_name(self) -> &'static str {
        match self {
            Self::Second => "seconds",
            Self::Minute => "minutes",
            Self::Hour => "hours",
            Self::Day => "days",
            Self::Week => "weeks",
            Self::Month => "months",
            Self::Quarter => "quarters",
            Self::Year => "years",
        }
    }

    /// The shorthand token, e.g. `"M"`.
    #[must_use]
    pub const fn shorthand(self) -> &'static str {
        match self {
            Self::Second => "s",
            Self::Minute => "m",
            Self::Hour => "h",
            Self::Day => "d",
            Self::Week => "w",
            Self::Month => "M",
            Self::Quarter => "Q",
            Self::Year => "y",
        }
    }

    /// Duration of one unit in milliseconds.
    ///
    /// Exact for fixed-duration units; the long-run Gregorian average for
    /// month, quarter, and year.
    #[must_use]
    pub const fn average_millis(self) -> i64 {
        match self {
            Self::Second => 1_000,
            Self::Minute => 60_000,
            Self::Hour => 3_600_000,
            Self::Day => 86_400_000,
            Self::Week => 604_800_000,
            Self::Month => AVERAGE_MONTH_MILLIS,
            Self::Quarter => 3 * AVERAGE_MONTH_MILLIS,
            Self::Year => 12 * AVERAGE_MONTH_MILLIS,
        }
    }

    /// Whether the unit's exact duration depends on which calendar months
    /// it spans.
    #[must_use]
    pub const fn is_calendar_variable(self) -> bool {
        matches!(self, Self::Month | Self::Quarter | Self::Year)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}
