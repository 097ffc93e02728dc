//! Entity extraction from free-text meeting requests.
//!
//! Extraction is best effort: any field may be missing or malformed, and the
//! service validates everything it receives. [`RegexExtractor`] is the
//! offline fallback; model-backed extractors implement the same trait.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw, untrusted output of an extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub participants: Option<Vec<String>>,
    pub duration_min: Option<i64>,
    /// Window bounds as ISO 8601 strings, with or without an offset.
    pub window_start: Option<String>,
    pub window_end: Option<String>,
    pub location: Option<String>,
}

/// Turns request text into candidate entities.
pub trait EntityExtractor: Send + Sync {
    /// `timezone` is the zone relative phrases should be read in; `now` anchors them.
    fn extract(&self, text: &str, timezone: Tz, now: DateTime<Utc>) -> ExtractedEntities;
}

// ============================================================================
// Regex Patterns
// ============================================================================

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+").expect("Invalid regex")
});

static VALID_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+$").expect("Invalid regex")
});

static MINUTES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,5})\s*(?:min|mins|minutes|m)\b").expect("Invalid regex")
});

static HOURS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,3})\s*(?:h|hr|hrs|hour|hours)\b").expect("Invalid regex")
});

/// Whether `s` looks like a deliverable email address.
pub fn is_valid_email(s: &str) -> bool {
    VALID_EMAIL.is_match(s)
}

// ============================================================================
// Regex Extractor
// ============================================================================

/// Pattern-matching extractor used when no language model is available.
///
/// Finds email addresses and a meeting length ("45 min", "1 hour"). The window
/// is always the next business morning, 09:00-12:00 in the requested zone.
#[derive(Debug, Clone, Default)]
pub struct RegexExtractor;

impl RegexExtractor {
    pub fn new() -> Self {
        Self
    }

    fn participants(text: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for m in EMAIL_PATTERN.find_iter(text) {
            let email = m.as_str().to_lowercase();
            if !found.contains(&email) {
                found.push(email);
            }
        }
        found
    }

    fn duration_min(text: &str) -> Option<i64> {
        if let Some(caps) = MINUTES_PATTERN.captures(text) {
            return caps[1].parse().ok();
        }
        HOURS_PATTERN
            .captures(text)
            .and_then(|caps| caps[1].parse::<i64>().ok())
            .map(|h| h * 60)
    }
}

impl EntityExtractor for RegexExtractor {
    fn extract(&self, text: &str, timezone: Tz, now: DateTime<Utc>) -> ExtractedEntities {
        let window = slot_engine::next_business_window(now, timezone).ok();
        let entities = ExtractedEntities {
            participants: Some(Self::participants(text)),
            duration_min: Self::duration_min(text),
            window_start: window.map(|w| w.start.to_rfc3339()),
            window_end: window.map(|w| w.end.to_rfc3339()),
            location: None,
        };
        debug!(?entities, "regex extraction");
        entities
    }
}
