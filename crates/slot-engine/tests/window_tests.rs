//! Tests for window resolution at the upstream boundary.

use chrono::{NaiveDate, TimeZone, Utc};
use slot_engine::window::{
    business_window, default_window, localize_instant, next_business_window, parse_timezone,
    resolve_window, DEFAULT_WINDOW_HOURS,
};
use slot_engine::SlotError;

fn addis() -> chrono_tz::Tz {
    parse_timezone("Africa/Addis_Ababa").unwrap()
}

#[test]
fn explicit_window_with_offsets_is_kept() {
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();

    let window = resolve_window(
        Some("2026-03-17T09:00:00+03:00"),
        Some("2026-03-17T12:00:00+03:00"),
        addis(),
        now,
        DEFAULT_WINDOW_HOURS,
    )
    .unwrap();

    assert_eq!(window.start.to_rfc3339(), "2026-03-17T09:00:00+03:00");
    assert_eq!(window.duration_minutes(), 180);
}

#[test]
fn naive_window_bounds_get_the_default_zone() {
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();

    let window = resolve_window(
        Some("2026-03-17T09:00:00"),
        Some("2026-03-17T12:00"),
        addis(),
        now,
        DEFAULT_WINDOW_HOURS,
    )
    .unwrap();

    assert_eq!(window.start.to_rfc3339(), "2026-03-17T09:00:00+03:00");
    assert_eq!(window.end.to_rfc3339(), "2026-03-17T12:00:00+03:00");
}

#[test]
fn missing_bound_falls_back_to_default_window() {
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 6, 30, 0).unwrap();

    let window = resolve_window(Some("2026-03-17T09:00:00"), None, addis(), now, 24).unwrap();

    assert_eq!(window.start.to_rfc3339(), "2026-03-16T09:30:00+03:00");
    assert_eq!(window.end.to_rfc3339(), "2026-03-17T09:30:00+03:00");
}

#[test]
fn blank_bounds_fall_back_to_default_window() {
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 6, 30, 0).unwrap();

    let window = resolve_window(Some(""), Some("  "), addis(), now, 2).unwrap();

    assert_eq!(window.duration_minutes(), 120);
}

#[test]
fn inverted_window_is_rejected() {
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();

    let err = resolve_window(
        Some("2026-03-17T12:00:00"),
        Some("2026-03-17T09:00:00"),
        addis(),
        now,
        DEFAULT_WINDOW_HOURS,
    )
    .unwrap_err();

    assert!(matches!(err, SlotError::InvalidWindow(_)));
}

#[test]
fn garbage_bound_is_an_invalid_window() {
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();

    let err = resolve_window(Some("tomorrow morning"), Some("noon"), addis(), now, 24).unwrap_err();

    assert!(matches!(err, SlotError::InvalidWindow(_)));
}

#[test]
fn huge_default_window_is_an_error_not_a_panic() {
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();

    let err = default_window(now, addis(), 9_000_000_000_000_000).unwrap_err();
    assert!(matches!(err, SlotError::InvalidWindow(_)));

    let err = resolve_window(None, None, addis(), now, i64::MAX).unwrap_err();
    assert!(matches!(err, SlotError::InvalidWindow(_)));
}

#[test]
fn non_positive_default_window_is_rejected() {
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();
    assert!(matches!(
        default_window(now, addis(), 0),
        Err(SlotError::InvalidWindow(_))
    ));
}

#[test]
fn fractional_seconds_are_accepted() {
    let dt = localize_instant("2026-03-16T09:00:00.250", addis()).unwrap();
    assert_eq!(dt.timestamp_subsec_millis(), 250);
}

#[test]
fn business_window_is_nine_to_noon_local() {
    let date = NaiveDate::from_ymd_opt(2026, 3, 17).unwrap();

    let window = business_window(date, addis()).unwrap();

    assert_eq!(window.start.to_rfc3339(), "2026-03-17T09:00:00+03:00");
    assert_eq!(window.end.to_rfc3339(), "2026-03-17T12:00:00+03:00");
}

#[test]
fn next_business_window_skips_the_weekend() {
    // Friday 2026-03-20 → Monday 2026-03-23.
    let friday = Utc.with_ymd_and_hms(2026, 3, 20, 10, 0, 0).unwrap();

    let window = next_business_window(friday, addis()).unwrap();

    assert_eq!(window.start.to_rfc3339(), "2026-03-23T09:00:00+03:00");
}

#[test]
fn next_business_window_uses_local_date() {
    // 22:30 UTC on Monday is already Tuesday 01:30 in Addis Ababa.
    let late_monday = Utc.with_ymd_and_hms(2026, 3, 16, 22, 30, 0).unwrap();

    let window = next_business_window(late_monday, addis()).unwrap();

    assert_eq!(window.start.to_rfc3339(), "2026-03-18T09:00:00+03:00");
}
