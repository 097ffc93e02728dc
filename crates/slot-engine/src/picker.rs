//! Enumerate candidate meeting start times from available intervals.
//!
//! Candidates sit on a fixed grid (`stride`) starting at each available
//! interval's start. The grid step is independent of the meeting duration, so
//! consecutive candidates may overlap each other; each one on its own fits
//! entirely inside its interval.

use chrono::Duration;
use tracing::trace;

use crate::error::{Result, SlotError};
use crate::freebusy;
use crate::interval::{Interval, TimeInstant};

/// Default number of proposed slots.
pub const DEFAULT_LIMIT: usize = 3;

/// Default grid step between candidates, in minutes.
pub const DEFAULT_STRIDE_MINUTES: i64 = 15;

/// Whole minutes as a [`Duration`], saturating instead of panicking on overflow.
fn minutes(m: i64) -> Duration {
    Duration::try_minutes(m).unwrap_or(if m < 0 { Duration::MIN } else { Duration::MAX })
}

/// Knobs for [`pick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickOptions {
    /// Maximum number of candidates returned. Must be at least 1.
    pub limit: usize,
    /// Step between successive candidates inside one interval. Must be positive.
    pub stride: Duration,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            stride: Duration::minutes(DEFAULT_STRIDE_MINUTES),
        }
    }
}

impl PickOptions {
    pub fn new(limit: usize, stride_minutes: i64) -> Self {
        Self {
            limit,
            stride: minutes(stride_minutes),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_stride_minutes(mut self, stride_minutes: i64) -> Self {
        self.stride = minutes(stride_minutes);
        self
    }

    /// # Errors
    /// [`SlotError::InvalidLimit`] or [`SlotError::InvalidStride`].
    pub fn validate(&self) -> Result<()> {
        if self.limit < 1 {
            return Err(SlotError::InvalidLimit(format!(
                "limit must be at least 1, got {}",
                self.limit
            )));
        }
        if self.stride <= Duration::zero() {
            return Err(SlotError::InvalidStride(format!(
                "stride must be positive, got {} minutes",
                self.stride.num_minutes()
            )));
        }
        Ok(())
    }
}

/// Reject a non-positive meeting duration.
pub fn validate_duration(duration: Duration) -> Result<()> {
    if duration <= Duration::zero() {
        return Err(SlotError::InvalidDuration(format!(
            "duration must be positive, got {} minutes",
            duration.num_minutes()
        )));
    }
    Ok(())
}

/// Pick up to `options.limit` start times from `available`.
///
/// `available` must satisfy the [`freebusy::normalize`] postcondition (sorted,
/// non-overlapping); other input gives unspecified (but memory-safe) output.
/// Scanning stops as soon as the limit is reached, so later intervals are never
/// visited.
///
/// Returns an empty list, not an error, when nothing fits.
///
/// # Errors
/// - [`SlotError::InvalidDuration`] if `duration <= 0`
/// - [`SlotError::InvalidLimit`] if `options.limit < 1`
/// - [`SlotError::InvalidStride`] if `options.stride <= 0`
pub fn pick(
    available: &[Interval],
    duration: Duration,
    options: &PickOptions,
) -> Result<Vec<TimeInstant>> {
    validate_duration(duration)?;
    options.validate()?;

    let mut slots = Vec::new();

    'intervals: for interval in available {
        let mut t = interval.start;
        while slots.len() < options.limit {
            match t.checked_add_signed(duration) {
                Some(end) if end <= interval.end => slots.push(t),
                _ => continue 'intervals,
            }
            match t.checked_add_signed(options.stride) {
                Some(next) => t = next,
                None => continue 'intervals,
            }
        }
        break;
    }

    Ok(slots)
}

/// [`pick`] with the default limit and stride and a duration in minutes.
pub fn pick_slots(available: &[Interval], duration_minutes: i64) -> Result<Vec<TimeInstant>> {
    pick(available, minutes(duration_minutes), &PickOptions::default())
}

/// Normalize `busy` against `window`, then pick slots from the result.
///
/// Arguments are validated before any work is done.
pub fn propose(
    window: &Interval,
    busy: &[Interval],
    duration: Duration,
    options: &PickOptions,
) -> Result<Vec<TimeInstant>> {
    validate_duration(duration)?;
    options.validate()?;

    let available = freebusy::normalize(window, busy)?;
    trace!(
        busy = busy.len(),
        available = available.len(),
        "normalized free/busy"
    );
    let slots = pick(&available, duration, options)?;
    trace!(slots = slots.len(), "picked slots");
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_three_slots_every_quarter_hour() {
        let options = PickOptions::default();
        assert_eq!(options.limit, 3);
        assert_eq!(options.stride, Duration::minutes(15));
    }

    #[test]
    fn builder_overrides_fields() {
        let options = PickOptions::default().with_limit(5).with_stride_minutes(30);
        assert_eq!(options, PickOptions::new(5, 30));
    }

    #[test]
    fn zero_stride_is_rejected() {
        let err = pick(&[], Duration::minutes(30), &PickOptions::new(3, 0)).unwrap_err();
        assert!(matches!(err, SlotError::InvalidStride(_)));
    }
}
