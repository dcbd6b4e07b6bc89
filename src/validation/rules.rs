//! Per-field validation rules
//!
//! Rules are plain data looked up from a table keyed by field, so adding a
//! field or changing its rule does not touch the validator.

use regex::Regex;
use std::sync::OnceLock;

use crate::record::Field;

static EMPLOYEE_ID: OnceLock<Regex> = OnceLock::new();
static DATE: OnceLock<Regex> = OnceLock::new();
static AMOUNT: OnceLock<Regex> = OnceLock::new();

/// Named patterns used by the rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// `N` followed by exactly eight digits
    EmployeeId,
    /// `DD-MM-YYYY` shape; the calendar is not checked
    Date,
}

impl Pattern {
    pub fn regex(&self) -> &'static Regex {
        match self {
            Pattern::EmployeeId => {
                EMPLOYEE_ID.get_or_init(|| compile(r"^N[0-9]{8}$"))
            }
            Pattern::Date => DATE.get_or_init(|| compile(r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$")),
        }
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

fn compile(pattern: &str) -> Regex {
    // Patterns are literals in this file; a failure here is a programming error.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {}: {}", pattern, e))
}

/// A validation rule for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Any non-empty text. Whitespace counts as content.
    Required,
    /// Must match the pattern
    Pattern(Pattern),
    /// Empty, or matches the pattern
    OptionalPattern(Pattern),
    /// Digits with at most one decimal point, numeric value strictly above zero
    PositiveAmount,
}

impl Rule {
    pub fn check(&self, value: &str) -> bool {
        match self {
            Rule::Required => !value.is_empty(),
            Rule::Pattern(p) => p.is_match(value),
            Rule::OptionalPattern(p) => value.is_empty() || p.is_match(value),
            Rule::PositiveAmount => is_positive_amount(value),
        }
    }

    /// Short description for error output
    pub fn describe(&self) -> &'static str {
        match self {
            Rule::Required => "a non-empty value",
            Rule::Pattern(Pattern::EmployeeId) => "N followed by 8 digits",
            Rule::Pattern(Pattern::Date) => "a date as DD-MM-YYYY",
            Rule::OptionalPattern(Pattern::EmployeeId) => "empty, or N followed by 8 digits",
            Rule::OptionalPattern(Pattern::Date) => "empty, or a date as DD-MM-YYYY",
            Rule::PositiveAmount => "an amount greater than zero",
        }
    }
}

/// Default rule for each field
pub const DEFAULT_RULES: [(Field, Rule); 7] = [
    (Field::AgencyCode, Rule::Required),
    (Field::Name, Rule::Required),
    (Field::EmployeeId, Rule::Pattern(Pattern::EmployeeId)),
    (Field::DeductionCode, Rule::Required),
    (Field::EffectiveDate, Rule::OptionalPattern(Pattern::Date)),
    (Field::DeductionEndDate, Rule::OptionalPattern(Pattern::Date)),
    (Field::DeductionAmount, Rule::PositiveAmount),
];

fn is_positive_amount(value: &str) -> bool {
    let pattern = AMOUNT.get_or_init(|| compile(r"^([0-9]+\.?[0-9]*|\.[0-9]+)$"));
    if !pattern.is_match(value) {
        return false;
    }
    match value.parse::<f64>() {
        Ok(amount) => amount > 0.0,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_rule() {
        let rule = Rule::PositiveAmount;
        assert!(rule.check("0.01"));
        assert!(rule.check("100"));
        assert!(rule.check("1."));
        assert!(rule.check(".5"));
        assert!(!rule.check("0"));
        assert!(!rule.check("0.00"));
        assert!(!rule.check("-5"));
        assert!(!rule.check("abc"));
        assert!(!rule.check("12.34.56"));
        assert!(!rule.check("."));
        assert!(!rule.check(""));
        assert!(!rule.check(" 5"));
    }

    #[test]
    fn test_employee_id_pattern() {
        let rule = Rule::Pattern(Pattern::EmployeeId);
        assert!(rule.check("N12345678"));
        assert!(!rule.check("X12345678"));
        assert!(!rule.check("N1234567"));
        assert!(!rule.check("N123456789"));
        assert!(!rule.check("n12345678"));
    }

    #[test]
    fn test_optional_date_pattern() {
        let rule = Rule::OptionalPattern(Pattern::Date);
        assert!(rule.check(""));
        assert!(rule.check("04-01-2024"));
        assert!(!rule.check("2024-01-04"));
        assert!(!rule.check("4-1-2024"));
        assert!(!rule.check("          "));
    }

    #[test]
    fn test_required_does_not_trim() {
        assert!(Rule::Required.check(" "));
        assert!(!Rule::Required.check(""));
    }

    #[test]
    fn test_default_table_covers_every_field_once() {
        for field in Field::ALL {
            let count = DEFAULT_RULES.iter().filter(|(f, _)| *f == field).count();
            assert_eq!(count, 1, "{} must have exactly one rule", field);
        }
    }
}
