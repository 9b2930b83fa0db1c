use thiserror::Error;

/// Errors raised by the picker core and its collaborators.
#[derive(Error, Debug)]
pub enum DatePickerError {
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    #[error("Date arithmetic left the supported calendar range")]
    DateOutOfRange,

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for picker operations.
pub type DatePickerResult<T> = Result<T, DatePickerError>;
