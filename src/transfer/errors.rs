//! # Transfer Errors

use std::path::PathBuf;

use thiserror::Error;

use crate::session::SessionError;

/// Result type for transfer operations
pub type TransferResult<T> = Result<T, TransferError>;

#[derive(Debug, Error)]
pub enum TransferError {
    /// A required setting is empty; the transfer was not started
    #[error("Transfer refused: {0} is required")]
    MissingPrerequisite(&'static str),

    /// A destination setting would point outside the destination folder
    #[error("Transfer refused: {setting} '{value}' must not contain path separators or '..'")]
    InvalidTarget { setting: &'static str, value: String },

    #[error("Local file does not exist: {}", .0.display())]
    LocalFileMissing(PathBuf),

    /// Saving before transfer failed
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Failed to transmit file to {destination}: {source}")]
    Io {
        destination: String,
        #[source]
        source: std::io::Error,
    },
}

impl TransferError {
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::MissingPrerequisite(_) => "NBEN_TRANSFER_REFUSED",
            TransferError::InvalidTarget { .. } => "NBEN_TRANSFER_INVALID_TARGET",
            TransferError::LocalFileMissing(_) => "NBEN_TRANSFER_LOCAL_FILE_MISSING",
            TransferError::Session(e) => e.code(),
            TransferError::Io { .. } => "NBEN_TRANSFER_FAILED",
        }
    }
}
