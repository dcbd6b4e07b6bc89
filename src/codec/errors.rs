//! Codec error types
//!
//! Error codes:
//! - NBEN_CODEC_READ_FAILED: input file could not be opened or read
//! - NBEN_CODEC_WRITE_FAILED: output file could not be created or written
//! - NBEN_CODEC_FIELD_OVERFLOW: strict encoding met a value wider than its column

use std::fmt;
use std::io;
use std::path::Path;

use crate::record::Field;

/// Codec error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecErrorCode {
    /// Reading the record file failed
    ReadFailed,
    /// Writing the record file failed
    WriteFailed,
    /// A value does not fit its column
    FieldOverflow,
}

impl CodecErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            CodecErrorCode::ReadFailed => "NBEN_CODEC_READ_FAILED",
            CodecErrorCode::WriteFailed => "NBEN_CODEC_WRITE_FAILED",
            CodecErrorCode::FieldOverflow => "NBEN_CODEC_FIELD_OVERFLOW",
        }
    }

    /// I/O failures versus malformed content
    pub fn is_io(&self) -> bool {
        matches!(self, CodecErrorCode::ReadFailed | CodecErrorCode::WriteFailed)
    }
}

impl fmt::Display for CodecErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Codec error with context
#[derive(Debug)]
pub struct CodecError {
    code: CodecErrorCode,
    message: String,
    details: Option<String>,
    field: Option<Field>,
    source: Option<io::Error>,
}

impl CodecError {
    /// File could not be opened or read
    pub fn read_failed(path: &Path, source: io::Error) -> Self {
        Self {
            code: CodecErrorCode::ReadFailed,
            message: format!("Failed to read record file: {}", path.display()),
            details: Some(source.to_string()),
            field: None,
            source: Some(source),
        }
    }

    /// File could not be created or written
    pub fn write_failed(path: &Path, source: io::Error) -> Self {
        Self {
            code: CodecErrorCode::WriteFailed,
            message: format!("Failed to write record file: {}", path.display()),
            details: Some(source.to_string()),
            field: None,
            source: Some(source),
        }
    }

    /// Value wider than the column it is written into
    pub fn field_overflow(row: Option<usize>, field: Field, len: usize) -> Self {
        let details = match row {
            Some(row) => format!("row: {}", row + 1),
            None => "row: n/a".to_string(),
        };
        Self {
            code: CodecErrorCode::FieldOverflow,
            message: format!(
                "{} is {} characters, column width is {}",
                field.name(),
                len,
                field.width()
            ),
            details: Some(details),
            field: Some(field),
            source: None,
        }
    }

    pub fn code(&self) -> CodecErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Field involved, for overflow errors
    pub fn field(&self) -> Option<Field> {
        self.field
    }

    pub fn is_io(&self) -> bool {
        self.code.is_io()
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_codes() {
        assert_eq!(CodecErrorCode::ReadFailed.code(), "NBEN_CODEC_READ_FAILED");
        assert_eq!(CodecErrorCode::WriteFailed.code(), "NBEN_CODEC_WRITE_FAILED");
        assert_eq!(CodecErrorCode::FieldOverflow.code(), "NBEN_CODEC_FIELD_OVERFLOW");
    }

    #[test]
    fn test_io_errors_keep_source() {
        let err = CodecError::read_failed(
            Path::new("missing.input"),
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.is_io());
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.input"));
    }

    #[test]
    fn test_overflow_display_names_field_and_row() {
        let err = CodecError::field_overflow(Some(2), Field::Name, 61);
        assert!(!err.is_io());
        assert_eq!(err.field(), Some(Field::Name));
        let display = err.to_string();
        assert!(display.contains("NBEN_CODEC_FIELD_OVERFLOW"));
        assert!(display.contains("Name"));
        assert!(display.contains("row: 3"));
    }
}
