//! Activity trail and clock capabilities injected into the service.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::error::{Result, SecretaryError};
use crate::models::LogEntry;

/// Append-only record of what the service did.
pub trait ActivityLog: Send + Sync {
    fn record(&self, entry: LogEntry) -> Result<()>;

    /// All entries in insertion order.
    fn entries(&self) -> Result<Vec<LogEntry>>;
}

#[derive(Debug, Default)]
pub struct InMemoryActivityLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl InMemoryActivityLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActivityLog for InMemoryActivityLog {
    fn record(&self, entry: LogEntry) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| SecretaryError::Activity("activity log lock poisoned".to_string()))?
            .push(entry);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<LogEntry>> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .map_err(|_| SecretaryError::Activity("activity log lock poisoned".to_string()))
    }
}

/// Source of "now" for default windows and log timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
