//! Error types for Apiscope core.

use std::{error::Error, fmt, io};

/// Error type for Apiscope core operations.
#[derive(Debug)]
pub enum ApiscopeError {
    /// A date string failed to parse as a `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// An underlying I/O error.
    Io(io::Error),
    /// A catch-all error with a message.
    Other(String),
}

impl fmt::Display for ApiscopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate(value) => write!(f, "invalid date: {value}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ApiscopeError {}

impl From<io::Error> for ApiscopeError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Convenience result type for Apiscope core.
pub type Result<T> = std::result::Result<T, ApiscopeError>;
