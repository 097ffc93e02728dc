//! Time instants and half-open intervals on a single absolute timeline.
//!
//! Every instant carries its UTC offset. Comparison, ordering and hashing use
//! the absolute instant only, so `09:00+03:00` and `06:00Z` are the same point.
//! Strings without an offset are rejected here; attaching a default zone is the
//! job of the caller (see [`crate::window::localize_instant`]).

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// An absolute point in time with the offset it was expressed in.
pub type TimeInstant = DateTime<FixedOffset>;

/// A half-open time range `[start, end)`.
///
/// Fields are public so callers can build intervals from already-validated
/// data; [`Interval::new`] is the checked constructor, and every operation that
/// accepts caller-supplied intervals re-validates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: TimeInstant,
    pub end: TimeInstant,
}

impl Interval {
    /// Build an interval, rejecting zero or negative length.
    ///
    /// # Errors
    /// Returns [`SlotError::InvalidInterval`] when `end <= start`.
    pub fn new(start: TimeInstant, end: TimeInstant) -> Result<Self> {
        let interval = Self { start, end };
        interval.validate()?;
        Ok(interval)
    }

    /// Build a requested window. Same rule as [`Interval::new`], different error.
    ///
    /// # Errors
    /// Returns [`SlotError::InvalidWindow`] when `end <= start`.
    pub fn window(start: TimeInstant, end: TimeInstant) -> Result<Self> {
        let window = Self { start, end };
        window.validate_window()?;
        Ok(window)
    }

    /// Parse two RFC 3339 strings into an interval.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_instant(start)?, parse_instant(end)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(SlotError::InvalidInterval(format!(
                "end {} is not after start {}",
                self.end.to_rfc3339(),
                self.start.to_rfc3339()
            )));
        }
        Ok(())
    }

    pub fn validate_window(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(SlotError::InvalidWindow(format!(
                "end {} is not after start {}",
                self.end.to_rfc3339(),
                self.start.to_rfc3339()
            )));
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Length in whole minutes (truncated).
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Whether `instant` falls inside `[start, end)`.
    pub fn contains(&self, instant: TimeInstant) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    ///
    /// Abutting intervals (one ends exactly when the other starts) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The part of `self` inside `window`, or `None` when they do not overlap.
    pub fn clip(&self, window: &Interval) -> Option<Interval> {
        if !self.overlaps(window) {
            return None;
        }
        Some(Interval {
            start: self.start.max(window.start),
            end: self.end.min(window.end),
        })
    }
}

/// Parse an RFC 3339 timestamp that carries an explicit offset.
///
/// Naive timestamps such as `"2026-03-16T09:00:00"` are rejected rather than
/// guessed.
///
/// # Errors
/// Returns [`SlotError::InvalidDatetime`] if the string is not RFC 3339.
pub fn parse_instant(s: &str) -> Result<TimeInstant> {
    DateTime::parse_from_rfc3339(s.trim())
        .map_err(|e| SlotError::InvalidDatetime(format!("'{}': {}", s, e)))
}
