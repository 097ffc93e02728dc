//! Configuration for the secretary service.
//!
//! Loaded from TOML; every field has a default, so an empty file is a valid
//! configuration. A handful of deployment-specific values can be overridden
//! from the environment.

use std::path::Path;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slot_engine::{PickOptions, DEFAULT_LIMIT, DEFAULT_STRIDE_MINUTES, DEFAULT_WINDOW_HOURS};
use tracing::debug;

use crate::error::{Result, SecretaryError};

pub const ENV_API_KEY: &str = "SECRETARY_API_KEY";
pub const ENV_TIMEZONE: &str = "SECRETARY_TIMEZONE";
pub const ENV_FOLLOWUP_RECIPIENT: &str = "SECRETARY_FOLLOWUP_RECIPIENT";
pub const ENV_SENDER: &str = "SECRETARY_SENDER";

/// Upper bound for `proposals.default_window_hours` (one leap year).
pub const MAX_DEFAULT_WINDOW_HOURS: i64 = 366 * 24;

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretaryConfig {
    /// Shared secret every request must present.
    pub api_key: String,
    /// IANA zone applied to naive timestamps and to the fallback window.
    pub default_timezone: String,
    /// Calendar queried for free/busy and written to on event creation.
    pub calendar_id: String,
    pub default_location: String,
    pub followup_recipient: String,
    pub sender: String,
    pub proposals: ProposalConfig,
}

impl Default for SecretaryConfig {
    fn default() -> Self {
        Self {
            api_key: "devkey".to_string(),
            default_timezone: "Africa/Addis_Ababa".to_string(),
            calendar_id: "primary".to_string(),
            default_location: "Google Meet".to_string(),
            followup_recipient: "me@example.com".to_string(),
            sender: "no-reply@example.com".to_string(),
            proposals: ProposalConfig::default(),
        }
    }
}

/// Slot proposal policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalConfig {
    /// Maximum number of proposed start times.
    pub limit: usize,
    /// Minutes between successive candidates.
    pub stride_minutes: i64,
    /// Meeting length used when the request does not name one.
    pub default_duration_minutes: i64,
    /// Length of the fallback window starting "now".
    pub default_window_hours: i64,
    /// Upper bound on busy intervals accepted from the calendar per request.
    pub max_busy_intervals: usize,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            stride_minutes: DEFAULT_STRIDE_MINUTES,
            default_duration_minutes: 30,
            default_window_hours: DEFAULT_WINDOW_HOURS,
            max_busy_intervals: 1000,
        }
    }
}

impl FromStr for SecretaryConfig {
    type Err = SecretaryError;

    /// Parse and validate a TOML document.
    fn from_str(content: &str) -> Result<Self> {
        let config: SecretaryConfig =
            toml::from_str(content).map_err(|e| SecretaryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl SecretaryConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            SecretaryError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        content.parse()
    }

    /// Apply environment overrides using `lookup` (normally `std::env::var`).
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_API_KEY) {
            self.api_key = v;
        }
        if let Some(v) = lookup(ENV_TIMEZONE) {
            self.default_timezone = v;
        }
        if let Some(v) = lookup(ENV_FOLLOWUP_RECIPIENT) {
            self.followup_recipient = v;
        }
        if let Some(v) = lookup(ENV_SENDER) {
            self.sender = v;
        }
        self.validate()?;
        Ok(self)
    }

    /// [`SecretaryConfig::with_env_overrides`] against the process environment.
    pub fn with_process_env(self) -> Result<Self> {
        self.with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn timezone(&self) -> Result<Tz> {
        slot_engine::parse_timezone(&self.default_timezone)
            .map_err(|e| SecretaryError::Config(e.to_string()))
    }

    pub fn pick_options(&self) -> PickOptions {
        PickOptions::new(self.proposals.limit, self.proposals.stride_minutes)
    }

    fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(SecretaryError::Config("api_key must not be empty".to_string()));
        }
        if self.calendar_id.is_empty() {
            return Err(SecretaryError::Config(
                "calendar_id must not be empty".to_string(),
            ));
        }
        self.timezone()?;

        let p = &self.proposals;
        if p.limit == 0 {
            return Err(SecretaryError::Config("proposals.limit must be > 0".to_string()));
        }
        if p.stride_minutes <= 0 {
            return Err(SecretaryError::Config(
                "proposals.stride_minutes must be > 0".to_string(),
            ));
        }
        if p.default_duration_minutes <= 0 {
            return Err(SecretaryError::Config(
                "proposals.default_duration_minutes must be > 0".to_string(),
            ));
        }
        if p.default_window_hours <= 0 || p.default_window_hours > MAX_DEFAULT_WINDOW_HOURS {
            return Err(SecretaryError::Config(format!(
                "proposals.default_window_hours must be in 1..={}",
                MAX_DEFAULT_WINDOW_HOURS
            )));
        }
        if p.max_busy_intervals == 0 {
            return Err(SecretaryError::Config(
                "proposals.max_busy_intervals must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
