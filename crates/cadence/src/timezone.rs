//! Timezone resolution and local date-time parsing.
//!
//! Thin pass-through to `chrono`/`chrono-tz`: this crate orchestrates
//! calendar math, it does not reimplement timezone databases.

use std::str::FromStr;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{CadenceError, CadenceResult};

/// Date-time literal forms accepted for rule starts and window bounds.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// ## Summary
/// Resolves a timezone identifier to a `chrono_tz::Tz`.
///
/// ## Errors
/// Returns `CadenceError::InvalidTimezone` if the name is not a known
/// IANA zone.
pub fn resolve(name: &str) -> CadenceResult<Tz> {
    Tz::from_str(name).map_err(|_e| CadenceError::InvalidTimezone(name.to_string()))
}

/// ## Summary
/// Parses a date or date-time literal as a local instant in `tz`.
///
/// Accepts `YYYY-MM-DD` (midnight), `YYYY-MM-DD HH:MM:SS`, and
/// `YYYY-MM-DDTHH:MM:SS`. Times that occur twice during a DST fold
/// resolve to the earlier instant.
///
/// ## Errors
/// Returns `CadenceError::InvalidDate` if the text does not parse, names
/// an impossible calendar date (e.g. February 31), or falls inside a DST
/// gap in `tz`.
pub fn parse_local(s: &str, tz: Tz) -> CadenceResult<DateTime<Tz>> {
    let naive = parse_naive(s).ok_or_else(|| CadenceError::InvalidDate(s.to_string()))?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earlier, _later) => Ok(earlier),
        LocalResult::None => Err(CadenceError::InvalidDate(format!(
            "{s} does not exist in timezone {tz}"
        ))),
    }
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}
