use thiserror::Error;

use crate::enums::Frequency;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{frequency} schedules require a day of the week")]
    MissingDay { frequency: Frequency },
    #[error("invalid time of day '{0}' (expected HH:MM, 24-hour)")]
    InvalidTime(String),
    #[error("estimated duration must be at least one minute")]
    InvalidDuration,
    #[error("unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
