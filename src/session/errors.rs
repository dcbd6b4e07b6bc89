//! # Session Errors

use thiserror::Error;

use crate::codec::CodecError;
use crate::validation::ValidationError;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Save requested with no file path known
    #[error("No destination file selected")]
    NoDestination,

    #[error("Row {0} does not exist")]
    RowOutOfRange(usize),
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::Codec(e) => e.code().code(),
            SessionError::Validation(e) => e.code(),
            SessionError::NoDestination => "NBEN_SESSION_NO_DESTINATION",
            SessionError::RowOutOfRange(_) => "NBEN_SESSION_ROW_OUT_OF_RANGE",
        }
    }
}
