use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Non-existent local time {time} in {timezone}")]
    NonExistentTime { time: String, timezone: String },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
