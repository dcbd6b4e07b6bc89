//! # Member Import Errors

use thiserror::Error;

/// Result type for member import
pub type ImportResult<T> = Result<T, ImportError>;

/// Member import errors
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read member sheet {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Member sheet is not a JSON array of rows: {0}")]
    Malformed(String),

    #[error("The member data file is empty")]
    EmptySheet,

    #[error("No members selected")]
    NoSelection,

    #[error("Member row {0} does not exist")]
    RowOutOfRange(usize),

    #[error("Member row {row} has no column {column}")]
    MissingColumn { row: usize, column: usize },
}

impl ImportError {
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::Read { .. } => "NBEN_IMPORT_READ_FAILED",
            ImportError::Malformed(_) => "NBEN_IMPORT_MALFORMED",
            ImportError::EmptySheet => "NBEN_IMPORT_EMPTY",
            ImportError::NoSelection => "NBEN_IMPORT_NO_SELECTION",
            ImportError::RowOutOfRange(_) => "NBEN_IMPORT_ROW_OUT_OF_RANGE",
            ImportError::MissingColumn { .. } => "NBEN_IMPORT_MISSING_COLUMN",
        }
    }
}
