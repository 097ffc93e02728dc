//! # slot-engine
//!
//! Deterministic meeting-slot derivation for a scheduling assistant.
//!
//! Given a requested window and the busy intervals a calendar reports inside
//! it, the engine computes the available intervals and then a short, ordered
//! list of candidate meeting start times. Everything here is pure and
//! synchronous: no I/O, no clock reads, no shared state.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::Duration;
//! use slot_engine::{normalize, pick, Interval, PickOptions};
//!
//! let window = Interval::parse("2026-03-16T09:00:00Z", "2026-03-16T12:00:00Z").unwrap();
//! let busy = vec![Interval::parse("2026-03-16T10:00:00Z", "2026-03-16T10:30:00Z").unwrap()];
//!
//! let available = normalize(&window, &busy).unwrap();
//! assert_eq!(available.len(), 2);
//!
//! let slots = pick(&available, Duration::minutes(30), &PickOptions::default()).unwrap();
//! assert_eq!(slots.len(), 3);
//! assert_eq!(slots[0].to_rfc3339(), "2026-03-16T09:00:00+00:00");
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — `TimeInstant`, `Interval`, strict RFC 3339 parsing
//! - [`freebusy`] — busy intervals → available intervals within a window
//! - [`picker`] — available intervals → candidate start times
//! - [`window`] — default-zone and default-window resolution for upstream input
//! - [`error`] — Error types

pub mod error;
pub mod freebusy;
pub mod interval;
pub mod picker;
pub mod window;

pub use error::SlotError;
pub use freebusy::{merge_busy, normalize};
pub use interval::{parse_instant, Interval, TimeInstant};
pub use picker::{
    pick, pick_slots, propose, validate_duration, PickOptions, DEFAULT_LIMIT,
    DEFAULT_STRIDE_MINUTES,
};
pub use window::{
    business_window, default_window, localize_instant, next_business_window, parse_timezone,
    resolve_window, DEFAULT_WINDOW_HOURS,
};
