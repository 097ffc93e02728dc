//! Request and response payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slot_engine::{Interval, TimeInstant};

use crate::mail::MailReceipt;

/// A free-text scheduling request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRequest {
    pub text: String,
    #[serde(default)]
    pub actor_email: Option<String>,
    /// Per-request override of the configured proposal limit.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Per-request override of the configured candidate stride.
    #[serde(default)]
    pub stride_minutes: Option<i64>,
}

impl IntentRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            actor_email: None,
            limit: None,
            stride_minutes: None,
        }
    }
}

/// Validated entities behind a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentEntities {
    pub participants: Vec<String>,
    pub duration_min: i64,
    /// The window the proposal was computed against.
    pub window: Option<Interval>,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResponse {
    pub intent: String,
    pub entities: IntentEntities,
    pub proposed_slots: Vec<TimeInstant>,
    pub status: String,
}

/// A confirmed meeting to put on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCreate {
    pub title: String,
    pub attendees: Vec<String>,
    pub start: TimeInstant,
    pub end: TimeInstant,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCreated {
    pub status: String,
    pub event_id: String,
    pub hangout_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowupReport {
    pub status: String,
    pub recipient: String,
    pub receipt: MailReceipt,
}

/// One line of the activity trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub action: String,
    pub payload: serde_json::Value,
    pub status: String,
}
