//! Field validator and the validate-and-collect boundary
//!
//! Collecting walks rows in order and stops at the first failing field.
//! Nothing is returned on failure: either every row passed, or the caller
//! gets the one location that did not.

use std::collections::HashMap;

use crate::codec::latin1_uppercase;
use crate::record::{Field, Record, RecordSet};

use super::errors::{ValidationError, ValidationResult};
use super::rules::{Rule, DEFAULT_RULES};

/// Checks a single field value.
///
/// `collect_validated` is written against this trait so that alternative
/// rule sets can be plugged in.
pub trait FieldCheck {
    fn check(&self, field: Field, value: &str) -> bool;
}

/// Table-driven validator
#[derive(Debug, Clone)]
pub struct Validator {
    rules: HashMap<Field, Rule>,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.iter().copied().collect(),
        }
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the rule for one field
    pub fn with_rule(mut self, field: Field, rule: Rule) -> Self {
        self.rules.insert(field, rule);
        self
    }

    pub fn rule(&self, field: Field) -> Option<Rule> {
        self.rules.get(&field).copied()
    }

    /// Validates one value. A field with no rule never validates.
    pub fn validate(&self, field: Field, value: &str) -> bool {
        self.rules.get(&field).is_some_and(|rule| rule.check(value))
    }

    /// Validates by display name; unknown names are invalid.
    pub fn validate_by_name(&self, name: &str, value: &str) -> bool {
        Field::from_name(name).is_some_and(|field| self.validate(field, value))
    }

    /// Validates every field of one row, in column order.
    pub fn validate_record(&self, row: usize, record: &Record) -> ValidationResult<()> {
        validate_row(self, row, record)
    }
}

impl FieldCheck for Validator {
    fn check(&self, field: Field, value: &str) -> bool {
        self.validate(field, value)
    }
}

fn validate_row<C: FieldCheck + ?Sized>(check: &C, row: usize, record: &Record) -> ValidationResult<()> {
    for (field, value) in record.values() {
        if !check.check(field, value) {
            return Err(ValidationError::new(row, field, value));
        }
    }
    Ok(())
}

/// Validates rows in order and returns normalized copies.
///
/// Stops at the first failing field and reports its row and field; later
/// rows are not looked at. Names are upper-cased in the returned set.
pub fn collect_validated<C: FieldCheck + ?Sized>(rows: &[Record], check: &C) -> ValidationResult<RecordSet> {
    let mut collected = Vec::with_capacity(rows.len());
    for (row, record) in rows.iter().enumerate() {
        validate_row(check, row, record)?;
        collected.push(normalize(record));
    }
    Ok(RecordSet::from(collected))
}

/// Applies the write-side normalization: upper-case names.
pub fn normalize(record: &Record) -> Record {
    let mut out = record.clone();
    out.name = latin1_uppercase(&record.name);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::Pattern;
    use std::cell::RefCell;

    fn valid(name: &str) -> Record {
        Record::from_values([
            "05527", name, "N12345678", "456", "04-01-2024", "", "25.00",
        ])
    }

    #[test]
    fn test_validate_by_name() {
        let validator = Validator::new();
        assert!(validator.validate_by_name("Deduction Amount", "0.01"));
        assert!(!validator.validate_by_name("Deduction Amount", "0"));
        assert!(validator.validate_by_name("Employee ID", "N12345678"));
        assert!(!validator.validate_by_name("Unknown Column", "x"));
    }

    #[test]
    fn test_collect_uppercases_names() {
        let rows = vec![valid("doe jane")];
        let set = collect_validated(&rows, &Validator::new()).unwrap();
        assert_eq!(set.get(0).unwrap().name, "DOE JANE");
        // input untouched
        assert_eq!(rows[0].name, "doe jane");
    }

    #[test]
    fn test_with_rule_overrides_table() {
        let strict = Validator::new().with_rule(Field::EffectiveDate, Rule::Pattern(Pattern::Date));
        assert!(!strict.validate(Field::EffectiveDate, ""));
        assert!(Validator::new().validate(Field::EffectiveDate, ""));
    }

    struct Recording<'a> {
        inner: Validator,
        seen: &'a RefCell<Vec<String>>,
    }

    impl FieldCheck for Recording<'_> {
        fn check(&self, field: Field, value: &str) -> bool {
            self.seen.borrow_mut().push(format!("{}:{}", field.index(), value));
            self.inner.check(field, value)
        }
    }

    #[test]
    fn test_stops_at_first_failure() {
        let mut bad = valid("C");
        bad.effective_date = "2024/01/04".into();
        let mut also_bad = valid("D");
        also_bad.employee_id = "X".into();
        let rows = vec![valid("A"), valid("B"), bad, also_bad];

        let seen = RefCell::new(Vec::new());
        let check = Recording {
            inner: Validator::new(),
            seen: &seen,
        };
        let err = collect_validated(&rows, &check).unwrap_err();

        assert_eq!(err.row(), 2);
        assert_eq!(err.field(), Field::EffectiveDate);
        // two full rows, then row 2 up to and including Effective Date
        assert_eq!(seen.borrow().len(), 7 + 7 + 5);
        assert!(!seen.borrow().iter().any(|s| s.ends_with(":D")));
    }
}
