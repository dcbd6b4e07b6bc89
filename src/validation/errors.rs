//! Validation error type
//!
//! Error code: NBEN_VALIDATION_FAILED. Identifies the first failing
//! row and field; the operation that raised it committed nothing.

use std::fmt;

use crate::record::Field;

pub const VALIDATION_FAILED: &str = "NBEN_VALIDATION_FAILED";

/// First field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Zero-based row index
    row: usize,
    field: Field,
    /// Offending value, as entered
    value: String,
}

impl ValidationError {
    pub fn new(row: usize, field: Field, value: impl Into<String>) -> Self {
        Self {
            row,
            field,
            value: value.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        VALIDATION_FAILED
    }

    /// Zero-based index of the failing row
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Rows are numbered from 1 for people reading the message.
        write!(
            f,
            "{}: Invalid value for {} at row {}: '{}'",
            VALIDATION_FAILED,
            self.field,
            self.row + 1,
            self.value
        )
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_one_based_row() {
        let err = ValidationError::new(2, Field::EffectiveDate, "2024-01-04");
        let display = err.to_string();
        assert!(display.contains("NBEN_VALIDATION_FAILED"));
        assert!(display.contains("Effective Date"));
        assert!(display.contains("row 3"));
        assert_eq!(err.row(), 2);
    }
}
