//! # secretary
//!
//! Request handling for a scheduling assistant built on [`slot_engine`].
//!
//! A [`Secretary`] receives free-text meeting requests, asks an
//! [`EntityExtractor`] for participants, duration and window, queries a
//! [`CalendarProvider`] for busy time, and answers with a short list of
//! proposed start times. It also books confirmed meetings, sends follow-up
//! mail through a [`Mailer`], and keeps an [`ActivityLog`]. Every external
//! system is a trait object injected at construction.
//!
//! ## Modules
//!
//! - [`service`] — the `Secretary` operations
//! - [`config`] — TOML configuration with environment overrides
//! - [`extract`] — extractor trait and regex fallback
//! - [`calendar`] — calendar provider trait and in-memory implementation
//! - [`mail`] — mailer trait and dry-run implementation
//! - [`activity`] — activity log and clock capabilities
//! - [`models`] — request/response payloads
//! - [`error`] — Error types

pub mod activity;
pub mod calendar;
pub mod config;
pub mod error;
pub mod extract;
pub mod mail;
pub mod models;
pub mod service;

pub use activity::{ActivityLog, Clock, FixedClock, InMemoryActivityLog, SystemClock};
pub use calendar::{CalendarProvider, CreatedEvent, InMemoryCalendar, NewEvent};
pub use config::{ProposalConfig, SecretaryConfig};
pub use error::SecretaryError;
pub use extract::{EntityExtractor, ExtractedEntities, RegexExtractor};
pub use mail::{DryRunMailer, MailReceipt, Mailer, OutgoingMail};
pub use models::{
    EventCreate, EventCreated, FollowupReport, IntentEntities, IntentRequest, IntentResponse,
    LogEntry,
};
pub use service::Secretary;
