//! Turn a free/busy answer into available time.
//!
//! Clips busy intervals to the requested window, sorts them, then walks a cursor
//! across the window emitting every gap. Overlapping, nested, duplicated or
//! abutting busy intervals are absorbed by advancing the cursor to the furthest
//! end seen so far.

use crate::error::{Result, SlotError};
use crate::interval::Interval;

/// Validate the window and every busy interval, failing on the first bad one.
fn validate(window: &Interval, busy: &[Interval]) -> Result<()> {
    window.validate_window()?;
    for (index, interval) in busy.iter().enumerate() {
        interval.validate().map_err(|e| match e {
            SlotError::InvalidInterval(msg) => {
                SlotError::InvalidInterval(format!("busy[{}]: {}", index, msg))
            }
            other => other,
        })?;
    }
    Ok(())
}

/// Busy intervals clipped to the window, sorted by `(start, end)`.
fn clipped_sorted(window: &Interval, busy: &[Interval]) -> Vec<Interval> {
    let mut intervals: Vec<Interval> = busy.iter().filter_map(|b| b.clip(window)).collect();
    intervals.sort_by_key(|i| (i.start, i.end));
    intervals
}

/// Merge overlapping or abutting busy intervals inside the window.
///
/// Returns a sorted, non-overlapping list. Together with [`normalize`] the two
/// outputs tile the window exactly.
///
/// # Errors
/// Same validation as [`normalize`].
pub fn merge_busy(window: &Interval, busy: &[Interval]) -> Result<Vec<Interval>> {
    validate(window, busy)?;

    let mut merged: Vec<Interval> = Vec::new();
    for interval in clipped_sorted(window, busy) {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }
    Ok(merged)
}

/// Compute the available intervals of `window` not covered by any busy interval.
///
/// `busy` may be empty, unsorted, overlapping, or reach outside the window.
/// The result is sorted ascending, mutually non-overlapping, and every interval
/// lies inside `window`. An empty `busy` yields `[window]`.
///
/// # Errors
/// Returns [`SlotError::InvalidWindow`] if `window.end <= window.start`, and
/// [`SlotError::InvalidInterval`] for the first busy interval with
/// `end <= start`. No partial result is produced.
pub fn normalize(window: &Interval, busy: &[Interval]) -> Result<Vec<Interval>> {
    validate(window, busy)?;

    let mut available = Vec::new();
    let mut cursor = window.start;

    for interval in clipped_sorted(window, busy) {
        if interval.start > cursor {
            available.push(Interval {
                start: cursor,
                end: interval.start,
            });
        }
        cursor = cursor.max(interval.end);
    }

    // Trailing gap after the last busy period.
    if cursor < window.end {
        available.push(Interval {
            start: cursor,
            end: window.end,
        });
    }

    Ok(available)
}

