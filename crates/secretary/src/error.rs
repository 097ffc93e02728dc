//! Error types for the request-handling layer.

use slot_engine::SlotError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecretaryError {
    #[error("Forbidden")]
    Forbidden,

    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error("Too many busy intervals: {count} exceeds the limit of {max}")]
    TooManyBusyIntervals { count: usize, max: usize },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Activity log error: {0}")]
    Activity(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SecretaryError {
    /// HTTP-style status class a front end should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            SecretaryError::Forbidden => 403,
            SecretaryError::Slot(_)
            | SecretaryError::TooManyBusyIntervals { .. }
            | SecretaryError::InvalidRequest(_) => 400,
            SecretaryError::Calendar(_)
            | SecretaryError::Mail(_)
            | SecretaryError::Activity(_)
            | SecretaryError::Config(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, SecretaryError>;
