//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid stride: {0}")]
    InvalidStride(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
