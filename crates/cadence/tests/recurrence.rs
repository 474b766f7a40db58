//! End-to-end tests for recurrence rule construction and queries.
//!
//! Exercises the public surface the way a caller would: string start
//! dates, string window bounds, and interval specifications built from
//! unit tokens.

use std::time::SystemTime;

use cadence::{CadenceError, Interval, RecurrenceRule, Unit, to_system_times};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

fn spec(pairs: &[(&str, i64)]) -> Interval {
    Interval::from_spec(pairs.iter().copied()).expect("valid interval spec")
}

fn date(tz: Tz, y: i32, m: u32, d: u32) -> DateTime<Tz> {
    tz.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .expect("unambiguous test date")
}

// ============================================================================
// Construction
// ============================================================================

#[test_log::test]
fn constructor_rejects_invalid_calendar_date() {
    // The 31st of February is not a valid date
    let err = RecurrenceRule::new("2000-02-31", spec(&[("months", 1)]), "UTC")
        .expect_err("should reject");
    assert!(matches!(err, CadenceError::InvalidDate(_)));
}

#[test_log::test]
fn constructor_rejects_unknown_timezone() {
    let err = RecurrenceRule::new("2000-01-01", spec(&[("months", 1)]), "Adventure/Time")
        .expect_err("should reject");
    assert!(matches!(err, CadenceError::InvalidTimezone(_)));
}

#[test_log::test]
fn interval_spec_rejects_unknown_unit() {
    let err = Interval::from_spec([("moons", 1)]).expect_err("should reject");
    assert!(matches!(err, CadenceError::InvalidArgument(_)));
}

// ============================================================================
// occurrence
// ============================================================================

#[test_log::test]
fn occurrence_zero_matches_rule_start() {
    let rule = RecurrenceRule::new("2000-03-01", spec(&[("months", 1)]), "UTC")
        .expect("valid rule");

    let result = rule.occurrence(0).expect("in range");
    assert_eq!(result, date(Tz::UTC, 2000, 3, 1));
}

#[test_log::test]
fn occurrence_four_gives_the_fifth_occurrence() {
    let rule = RecurrenceRule::new("2000-03-01", spec(&[("months", 1)]), "UTC")
        .expect("valid rule");

    let result = rule.occurrence(4).expect("in range");
    assert_eq!(result, date(Tz::UTC, 2000, 7, 1));
}

// ============================================================================
// first
// ============================================================================

#[test_log::test]
fn first_gives_correct_number_of_occurrences() {
    let rule = RecurrenceRule::new("2000-01-01", Interval::default(), "UTC")
        .expect("valid rule");

    let result = rule.first(8).expect("in range");
    assert_eq!(result.len(), 8);
}

#[test_log::test]
fn first_uses_the_declared_timezone() {
    let rule = RecurrenceRule::new("2000-01-01", Interval::default(), "Pacific/Auckland")
        .expect("valid rule");

    let result = to_system_times(&rule.first(1).expect("in range"));
    let expected = vec![SystemTime::from(date(Tz::Pacific__Auckland, 2000, 1, 1))];
    assert_eq!(result, expected);
}

#[test_log::test]
fn first_monthly() {
    let rule = RecurrenceRule::new("2000-03-01", spec(&[("months", 1)]), "UTC")
        .expect("valid rule");

    let result = rule.first(5).expect("in range");
    let expected = vec![
        date(Tz::UTC, 2000, 3, 1),
        date(Tz::UTC, 2000, 4, 1),
        date(Tz::UTC, 2000, 5, 1),
        date(Tz::UTC, 2000, 6, 1),
        date(Tz::UTC, 2000, 7, 1),
    ];
    assert_eq!(result, expected);
}

#[test_log::test]
fn first_weekly() {
    let rule = RecurrenceRule::new("2015-06-15", spec(&[("weeks", 1)]), "UTC")
        .expect("valid rule");

    let result = rule.first(5).expect("in range");
    let expected = vec![
        date(Tz::UTC, 2015, 6, 15),
        date(Tz::UTC, 2015, 6, 22),
        date(Tz::UTC, 2015, 6, 29),
        date(Tz::UTC, 2015, 7, 6),
        date(Tz::UTC, 2015, 7, 13),
    ];
    assert_eq!(result, expected);
}

#[test_log::test]
fn first_daily() {
    let rule = RecurrenceRule::new("2018-06-15", spec(&[("days", 1)]), "UTC")
        .expect("valid rule");

    let result = rule.first(5).expect("in range");
    let expected = vec![
        date(Tz::UTC, 2018, 6, 15),
        date(Tz::UTC, 2018, 6, 16),
        date(Tz::UTC, 2018, 6, 17),
        date(Tz::UTC, 2018, 6, 18),
        date(Tz::UTC, 2018, 6, 19),
    ];
    assert_eq!(result, expected);
}

#[test_log::test]
fn daily_rule_has_no_drift_over_many_steps() {
    let rule = RecurrenceRule::new("2018-06-15", spec(&[("days", 1)]), "UTC")
        .expect("valid rule");

    // 10 years of daily steps stay exactly 24h apart
    let result = rule.occurrence(3653).expect("in range");
    let expected = date(Tz::UTC, 2018, 6, 15) + chrono::TimeDelta::days(3653);
    assert_eq!(result, expected);
}

// ============================================================================
// between
// ============================================================================

#[test_log::test]
fn between_daily() {
    let rule = RecurrenceRule::new("2012-08-22", spec(&[("days", 1)]), "UTC")
        .expect("valid rule");

    let result = rule.between("2013-05-03", "2013-05-08").expect("valid bounds");
    let expected = vec![
        date(Tz::UTC, 2013, 5, 3),
        date(Tz::UTC, 2013, 5, 4),
        date(Tz::UTC, 2013, 5, 5),
        date(Tz::UTC, 2013, 5, 6),
        date(Tz::UTC, 2013, 5, 7),
    ];
    assert_eq!(result, expected);
}

#[test_log::test]
fn between_with_bounds_off_the_rule_grid() {
    let rule = RecurrenceRule::new("2012-08-22", spec(&[("days", 1)]), "UTC")
        .expect("valid rule");

    let result = rule
        .between("2013-05-02 20:00:00", "2013-05-07 15:00:00")
        .expect("valid bounds");
    let expected = vec![
        date(Tz::UTC, 2013, 5, 3),
        date(Tz::UTC, 2013, 5, 4),
        date(Tz::UTC, 2013, 5, 5),
        date(Tz::UTC, 2013, 5, 6),
        date(Tz::UTC, 2013, 5, 7),
    ];
    assert_eq!(result, expected);
}

/// The estimate phase uses averaged month/quarter/year lengths, so a
/// window a century from the rule's start is where an uncorrected seed
/// would show up as wrong or missing occurrences.
#[test_log::test]
fn between_with_window_far_in_the_future() {
    // Wednesday 3rd May 2017 UTC
    let rule = RecurrenceRule::new("2017-05-03", spec(&[("days", 7)]), "UTC")
        .expect("valid rule");

    let result = rule.between("2117-05-05", "2117-06-02").expect("valid bounds");
    let expected = vec![
        date(Tz::UTC, 2117, 5, 5),
        date(Tz::UTC, 2117, 5, 12),
        date(Tz::UTC, 2117, 5, 19),
        date(Tz::UTC, 2117, 5, 26),
    ];
    assert_eq!(result, expected);
}

#[test_log::test]
fn between_far_future_matches_naive_enumeration() {
    let rule = RecurrenceRule::new("2000-01-31", spec(&[("months", 3)]), "UTC")
        .expect("valid rule");

    let from = date(Tz::UTC, 2100, 1, 1);
    let to = date(Tz::UTC, 2102, 1, 1);
    let naive: Vec<_> = rule
        .first(500)
        .expect("in range")
        .into_iter()
        .filter(|&dt| from <= dt && dt < to)
        .collect();
    assert!(!naive.is_empty());

    let queried = rule.between_instants(from, to).expect("in range");
    assert_eq!(queried, naive);
}

// ============================================================================
// average interval
// ============================================================================

#[test_log::test]
fn average_interval_from_long_names() {
    let interval = spec(&[("months", 2), ("days", 1)]);
    let expected = 2 * Unit::Month.average_millis() + Unit::Day.average_millis();

    assert_millis_eq(interval.average_millis(), expected);
}

#[test_log::test]
fn average_interval_from_shorthand() {
    let interval = spec(&[("Q", 2), ("m", 30)]);
    let expected = 2 * Unit::Quarter.average_millis() + 30 * Unit::Minute.average_millis();

    assert_millis_eq(interval.average_millis(), expected);
}

#[test_log::test]
fn average_interval_via_serde_spec() {
    let interval: Interval =
        serde_json::from_str(r#"{"months": 2, "days": 1}"#).expect("valid json spec");
    assert_eq!(interval, spec(&[("months", 2), ("days", 1)]));
}

#[expect(clippy::cast_precision_loss, reason = "Expected values are exact below 2^52")]
fn assert_millis_eq(actual: f64, expected: i64) {
    assert!((actual - expected as f64).abs() < 1e-6);
}

// ============================================================================
// native time conversion
// ============================================================================

#[test_log::test]
fn to_system_times_preserves_instants() {
    let rule = RecurrenceRule::new("2000-03-01", spec(&[("months", 1)]), "UTC")
        .expect("valid rule");

    let occurrences = rule.first(3).expect("in range");
    let times = to_system_times(&occurrences);

    let expected: Vec<SystemTime> = occurrences
        .iter()
        .map(|dt| SystemTime::from(dt.with_timezone(&Utc)))
        .collect();
    assert_eq!(times, expected);
}
