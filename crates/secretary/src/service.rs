//! The request-handling layer.
//!
//! [`Secretary`] authorises each call, validates whatever the collaborators
//! hand it, runs the slot engine, and records an activity entry for every
//! successful operation. It holds no mutable state of its own and can be
//! shared across threads behind an `Arc`.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde_json::json;
use slot_engine::{Interval, PickOptions, SlotError};
use tracing::{debug, info, warn};

use crate::activity::{ActivityLog, Clock, SystemClock};
use crate::calendar::{CalendarProvider, NewEvent};
use crate::config::SecretaryConfig;
use crate::error::{Result, SecretaryError};
use crate::extract::{is_valid_email, EntityExtractor, ExtractedEntities};
use crate::mail::{Mailer, OutgoingMail};
use crate::models::{
    EventCreate, EventCreated, FollowupReport, IntentEntities, IntentRequest, IntentResponse,
    LogEntry,
};

const ACTOR: &str = "agent";
const FOLLOWUP_SUBJECT: &str = "Thanks for today - recap & next steps";
const FOLLOWUP_HTML: &str =
    "<p>Thanks for the meeting today. Summary and next steps are attached.</p>";

pub struct Secretary {
    config: SecretaryConfig,
    timezone: Tz,
    extractor: Arc<dyn EntityExtractor>,
    calendar: Arc<dyn CalendarProvider>,
    mailer: Arc<dyn Mailer>,
    activity: Arc<dyn ActivityLog>,
    clock: Arc<dyn Clock>,
}

impl Secretary {
    /// Build a service from a validated configuration and its collaborators.
    ///
    /// # Errors
    /// Returns [`SecretaryError::Config`] if the configured timezone is unknown.
    pub fn new(
        config: SecretaryConfig,
        extractor: Arc<dyn EntityExtractor>,
        calendar: Arc<dyn CalendarProvider>,
        mailer: Arc<dyn Mailer>,
        activity: Arc<dyn ActivityLog>,
    ) -> Result<Self> {
        let timezone = config.timezone()?;
        Ok(Self {
            config,
            timezone,
            extractor,
            calendar,
            mailer,
            activity,
            clock: Arc::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &SecretaryConfig {
        &self.config
    }

    /// Reject calls that do not present the configured API key.
    pub fn authorize(&self, api_key: Option<&str>) -> Result<()> {
        match api_key {
            Some(key) if key == self.config.api_key => Ok(()),
            _ => {
                warn!("rejected request with missing or wrong api key");
                Err(SecretaryError::Forbidden)
            }
        }
    }

    /// Turn a free-text request into up to `limit` proposed start times.
    pub fn parse_intent(
        &self,
        api_key: Option<&str>,
        request: &IntentRequest,
    ) -> Result<IntentResponse> {
        self.authorize(api_key)?;
        if let Some(actor) = request.actor_email.as_deref() {
            if !is_valid_email(actor.trim()) {
                return Err(SecretaryError::InvalidRequest(format!(
                    "invalid actor email address: '{}'",
                    actor
                )));
            }
        }

        let now = self.clock.now();
        let extracted = self.extractor.extract(&request.text, self.timezone, now);
        debug!(?extracted, "extracted entities");

        let participants = validate_participants(extracted.participants.as_deref())?;
        let duration_min = extracted
            .duration_min
            .unwrap_or(self.config.proposals.default_duration_minutes);
        let duration = Duration::try_minutes(duration_min).ok_or_else(|| {
            SlotError::InvalidDuration(format!("{} minutes is out of range", duration_min))
        })?;
        slot_engine::validate_duration(duration)?;
        let options = self.pick_options(request);
        options.validate()?;
        let window = self.resolve_window(&extracted, now)?;

        let busy = self.calendar.free_busy(&self.config.calendar_id, &window)?;
        let max = self.config.proposals.max_busy_intervals;
        if busy.len() > max {
            return Err(SecretaryError::TooManyBusyIntervals {
                count: busy.len(),
                max,
            });
        }

        let proposed_slots = slot_engine::propose(&window, &busy, duration, &options)?;
        info!(
            busy = busy.len(),
            proposed = proposed_slots.len(),
            "proposed slots"
        );

        let response = IntentResponse {
            intent: "schedule_meeting".to_string(),
            entities: IntentEntities {
                participants,
                duration_min,
                window: Some(window),
                location: extracted
                    .location
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or_else(|| self.config.default_location.clone()),
            },
            proposed_slots,
            status: "slots_proposed".to_string(),
        };

        self.record("parse_intent", json!(request))?;
        Ok(response)
    }

    /// Put a confirmed meeting on the configured calendar.
    pub fn create_event(
        &self,
        api_key: Option<&str>,
        request: &EventCreate,
    ) -> Result<EventCreated> {
        self.authorize(api_key)?;

        if request.title.trim().is_empty() {
            return Err(SecretaryError::InvalidRequest(
                "title must not be empty".to_string(),
            ));
        }
        let attendees = validate_participants(Some(&request.attendees))?;
        Interval::new(request.start, request.end)?;

        let event = NewEvent {
            title: request.title.trim().to_string(),
            attendees,
            start: request.start,
            end: request.end,
            location: request
                .location
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| self.config.default_location.clone()),
        };
        let created = self
            .calendar
            .create_event(&self.config.calendar_id, &event)?;
        info!(id = %created.id, "event created");

        self.record("create_event", json!({ "id": created.id }))?;
        Ok(EventCreated {
            status: "created".to_string(),
            event_id: created.id,
            hangout_link: created.hangout_link,
        })
    }

    /// Send the post-meeting recap to the configured recipient.
    pub fn run_followups(&self, api_key: Option<&str>, hours: u32) -> Result<FollowupReport> {
        self.authorize(api_key)?;

        let mail = OutgoingMail {
            from: self.config.sender.clone(),
            to: self.config.followup_recipient.clone(),
            subject: FOLLOWUP_SUBJECT.to_string(),
            html: FOLLOWUP_HTML.to_string(),
        };
        let receipt = self.mailer.send(&mail)?;

        self.record("followups", json!({ "hours": hours }))?;
        Ok(FollowupReport {
            status: "sent".to_string(),
            recipient: mail.to,
            receipt,
        })
    }

    /// Activity entries in the order they were recorded.
    pub fn logs(&self, api_key: Option<&str>) -> Result<Vec<LogEntry>> {
        self.authorize(api_key)?;
        self.activity.entries()
    }

    fn pick_options(&self, request: &IntentRequest) -> PickOptions {
        let mut options = self.config.pick_options();
        if let Some(limit) = request.limit {
            options = options.with_limit(limit);
        }
        if let Some(stride) = request.stride_minutes {
            options = options.with_stride_minutes(stride);
        }
        options
    }

    fn resolve_window(
        &self,
        extracted: &ExtractedEntities,
        now: DateTime<Utc>,
    ) -> Result<Interval> {
        Ok(slot_engine::resolve_window(
            extracted.window_start.as_deref(),
            extracted.window_end.as_deref(),
            self.timezone,
            now,
            self.config.proposals.default_window_hours,
        )?)
    }

    fn record(&self, action: &str, payload: serde_json::Value) -> Result<()> {
        self.activity.record(LogEntry {
            timestamp: self.clock.now(),
            actor: ACTOR.to_string(),
            action: action.to_string(),
            payload,
            status: "ok".to_string(),
        })
    }
}

/// Every address must be well-formed; one bad entry rejects the request.
fn validate_participants(raw: Option<&[String]>) -> Result<Vec<String>> {
    let mut valid = Vec::new();
    for p in raw.unwrap_or_default() {
        let email = p.trim();
        if !is_valid_email(email) {
            return Err(SecretaryError::InvalidRequest(format!(
                "invalid email address: '{}'",
                p
            )));
        }
        valid.push(email.to_string());
    }
    Ok(valid)
}
