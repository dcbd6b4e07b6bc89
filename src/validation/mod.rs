//! Input validation for deduction rows
//!
//! Each field maps to one rule:
//!
//! - Agency Code, Name, Deduction Code: non-empty
//! - Employee ID: `N` + 8 digits
//! - Effective Date, Deduction End Date: empty or `DD-MM-YYYY`
//! - Deduction Amount: digits with at most one `.`, greater than zero
//!
//! Validation happens at one boundary, `collect_validated`, before rows are
//! handed to the codec for writing.

mod errors;
mod rules;
mod validator;

pub use errors::{ValidationError, ValidationResult, VALIDATION_FAILED};
pub use rules::{Pattern, Rule, DEFAULT_RULES};
pub use validator::{collect_validated, normalize, FieldCheck, Validator};
