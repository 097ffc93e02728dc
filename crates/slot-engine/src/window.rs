//! Resolve the requested window at the boundary with fuzzy upstream input.
//!
//! This is the one place where a default timezone is attached to naive
//! timestamps and where a missing window is replaced by a default one. All
//! functions take an explicit `now` anchor (no system clock access), so they
//! stay deterministic under test.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Utc, Weekday,
};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};
use crate::interval::{parse_instant, Interval, TimeInstant};

/// Hours covered by the fallback window when upstream supplies none.
pub const DEFAULT_WINDOW_HOURS: i64 = 24;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an IANA timezone name (e.g. `"Africa/Addis_Ababa"`).
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Attach `tz` to a local wall-clock time.
///
/// Local times that fall in a DST gap or overlap are rejected instead of
/// silently picking one side.
pub fn localize(naive: NaiveDateTime, tz: Tz) -> Result<TimeInstant> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.fixed_offset()),
        LocalResult::Ambiguous(_, _) => Err(SlotError::InvalidDatetime(format!(
            "{} is ambiguous in {}",
            naive, tz
        ))),
        LocalResult::None => Err(SlotError::InvalidDatetime(format!(
            "{} does not exist in {}",
            naive, tz
        ))),
    }
}

/// Parse a timestamp, applying `tz` only when the string carries no offset.
///
/// # Errors
/// Returns [`SlotError::InvalidDatetime`] when the string matches neither
/// RFC 3339 nor one of the accepted naive layouts, or names a local time that
/// does not map to exactly one instant.
pub fn localize_instant(s: &str, tz: Tz) -> Result<TimeInstant> {
    let trimmed = s.trim();
    if let Ok(dt) = parse_instant(trimmed) {
        return Ok(dt);
    }
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| SlotError::InvalidDatetime(format!("'{}' is not an ISO 8601 datetime", s)))?;
    localize(naive, tz)
}

/// `now .. now + hours`, expressed in `tz`.
pub fn default_window(now: DateTime<Utc>, tz: Tz, hours: i64) -> Result<Interval> {
    if hours <= 0 {
        return Err(SlotError::InvalidWindow(format!(
            "default window must span a positive number of hours, got {}",
            hours
        )));
    }
    let span = Duration::try_hours(hours).ok_or_else(|| {
        SlotError::InvalidWindow(format!("default window of {} hours is out of range", hours))
    })?;
    let start = now.with_timezone(&tz).fixed_offset();
    let end = start
        .checked_add_signed(span)
        .ok_or_else(|| SlotError::InvalidWindow("default window overflows".to_string()))?;
    Interval::window(start, end)
}

/// The 09:00-12:00 morning block of `date` in `tz`.
pub fn business_window(date: NaiveDate, tz: Tz) -> Result<Interval> {
    let (open, close) = NaiveTime::from_hms_opt(9, 0, 0)
        .zip(NaiveTime::from_hms_opt(12, 0, 0))
        .ok_or_else(|| SlotError::InvalidWindow("invalid business hours".to_string()))?;
    let start = localize(date.and_time(open), tz)?;
    let end = localize(date.and_time(close), tz)?;
    Interval::window(start, end)
}

/// Morning block of the first weekday strictly after `now`'s local date.
pub fn next_business_window(now: DateTime<Utc>, tz: Tz) -> Result<Interval> {
    let mut date = now.with_timezone(&tz).date_naive();
    loop {
        date = date
            .succ_opt()
            .ok_or_else(|| SlotError::InvalidWindow("date out of range".to_string()))?;
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            break;
        }
    }
    business_window(date, tz)
}

/// Turn optional upstream start/end strings into a validated window.
///
/// When either bound is missing the fallback `now .. now + default_hours`
/// window in `tz` is used. Otherwise both strings are parsed with
/// [`localize_instant`] and must form a window with `start < end`.
///
/// # Errors
/// Every failure is a [`SlotError::InvalidWindow`], including bounds that do
/// not parse.
pub fn resolve_window(
    start: Option<&str>,
    end: Option<&str>,
    tz: Tz,
    now: DateTime<Utc>,
    default_hours: i64,
) -> Result<Interval> {
    match (start, end) {
        (Some(start), Some(end)) if !start.trim().is_empty() && !end.trim().is_empty() => {
            let start = localize_instant(start, tz).map_err(|e| window_bound("start", e))?;
            let end = localize_instant(end, tz).map_err(|e| window_bound("end", e))?;
            Interval::window(start, end)
        }
        _ => default_window(now, tz, default_hours),
    }
}

fn window_bound(which: &str, err: SlotError) -> SlotError {
    match err {
        SlotError::InvalidDatetime(msg) => SlotError::InvalidWindow(format!("{}: {}", which, msg)),
        other => other,
    }
}
