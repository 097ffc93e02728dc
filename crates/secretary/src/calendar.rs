//! Calendar provider boundary.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use slot_engine::{Interval, TimeInstant};
use tracing::debug;

use crate::error::{Result, SecretaryError};

/// An event to insert into a calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub attendees: Vec<String>,
    pub start: TimeInstant,
    pub end: TimeInstant,
    pub location: String,
}

impl NewEvent {
    /// Conference request id derived from the title, as sent to the provider.
    pub fn request_id(&self) -> String {
        self.title.trim().replace(' ', "-")
    }
}

/// What the provider returns for an inserted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedEvent {
    pub id: String,
    pub hangout_link: Option<String>,
}

/// Read and write access to a calendar service.
pub trait CalendarProvider: Send + Sync {
    /// Busy intervals of `calendar_id` overlapping `window`, in any order.
    fn free_busy(&self, calendar_id: &str, window: &Interval) -> Result<Vec<Interval>>;

    fn create_event(&self, calendar_id: &str, event: &NewEvent) -> Result<CreatedEvent>;
}

#[derive(Debug, Default)]
struct CalendarState {
    busy: HashMap<String, Vec<Interval>>,
    events: Vec<(String, NewEvent, CreatedEvent)>,
}

/// Process-local calendar for tests and offline use.
///
/// Created events are added to the calendar's busy list, so later free/busy
/// queries see them.
#[derive(Debug, Default)]
pub struct InMemoryCalendar {
    state: Mutex<CalendarState>,
}

impl InMemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `calendar_id` with the given busy intervals.
    pub fn with_busy(mut self, calendar_id: impl Into<String>, busy: Vec<Interval>) -> Self {
        if let Ok(state) = self.state.get_mut() {
            state.busy.entry(calendar_id.into()).or_default().extend(busy);
        }
        self
    }

    /// Events created so far, in creation order, with their calendar id.
    pub fn created_events(&self) -> Result<Vec<(String, NewEvent, CreatedEvent)>> {
        Ok(self.lock()?.events.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, CalendarState>> {
        self.state
            .lock()
            .map_err(|_| SecretaryError::Calendar("calendar state lock poisoned".to_string()))
    }
}

impl CalendarProvider for InMemoryCalendar {
    fn free_busy(&self, calendar_id: &str, window: &Interval) -> Result<Vec<Interval>> {
        let state = self.lock()?;
        let busy = state
            .busy
            .get(calendar_id)
            .ok_or_else(|| SecretaryError::Calendar(format!("unknown calendar: {}", calendar_id)))?;
        Ok(busy.iter().filter(|b| b.overlaps(window)).copied().collect())
    }

    fn create_event(&self, calendar_id: &str, event: &NewEvent) -> Result<CreatedEvent> {
        let mut state = self.lock()?;
        if !state.busy.contains_key(calendar_id) {
            return Err(SecretaryError::Calendar(format!(
                "unknown calendar: {}",
                calendar_id
            )));
        }
        let interval = Interval::new(event.start, event.end)?;

        let created = CreatedEvent {
            id: format!("evt-{}", state.events.len() + 1),
            hangout_link: Some(format!(
                "https://meet.google.com/{}",
                event.request_id().to_lowercase()
            )),
        };
        debug!(calendar_id, id = %created.id, "created event");

        state
            .busy
            .entry(calendar_id.to_string())
            .or_default()
            .push(interval);
        state
            .events
            .push((calendar_id.to_string(), event.clone(), created.clone()));
        Ok(created)
    }
}
