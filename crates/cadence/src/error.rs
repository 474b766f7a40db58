use thiserror::Error;

/// Recurrence rule construction and query errors
#[derive(Error, Debug)]
pub enum CadenceError {
    /// A start or window bound could not be resolved to a calendar date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The timezone identifier is not a recognized IANA zone name.
    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    /// An interval key is unrecognized or a count is negative.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Scaled calendar arithmetic left the representable date range.
    #[error("Out of range: {0}")]
    OutOfRange(String),
}

pub type CadenceResult<T> = std::result::Result<T, CadenceError>;
