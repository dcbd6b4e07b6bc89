//! Editable row store
//!
//! Holds the rows of one editing session in display order. Row indices
//! always come from the current rows; out-of-range indices are reported as
//! `None`/`false` and leave the rows untouched.

use serde::{Deserialize, Serialize};

use crate::record::{Field, Record, RecordSet};
use crate::validation::{collect_validated, FieldCheck, Pattern, ValidationResult};

/// Values written into a duplicated row.
///
/// The duplicate is meant for adding a second deduction line for the same
/// person, so only the deduction code and amount change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateOverrides {
    pub deduction_code: String,
    pub deduction_amount: String,
}

impl Default for DuplicateOverrides {
    fn default() -> Self {
        Self {
            deduction_code: "407".to_string(),
            deduction_amount: "100".to_string(),
        }
    }
}

/// Rows under edit plus the session's sticky effective date
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    rows: RecordSet,
    /// Last date-shaped effective date applied; seeds new rows
    effective_date: String,
    overrides: DuplicateOverrides,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: DuplicateOverrides) -> Self {
        Self {
            overrides,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &RecordSet {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.rows.get(index)
    }

    pub fn overrides(&self) -> &DuplicateOverrides {
        &self.overrides
    }

    pub fn effective_date(&self) -> &str {
        &self.effective_date
    }

    /// Replaces all rows.
    pub fn load(&mut self, rows: RecordSet) {
        self.rows = rows;
    }

    /// Appends rows after the current ones.
    pub fn merge(&mut self, rows: RecordSet) {
        self.rows.extend(rows);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn push(&mut self, record: Record) -> usize {
        self.rows.push(record);
        self.rows.len() - 1
    }

    /// Inserts at `index` (`index == len` appends).
    pub fn insert(&mut self, index: usize, record: Record) -> bool {
        self.rows.insert(index, record)
    }

    /// Appends a blank row and returns its index.
    ///
    /// The Employee ID starts as `"N"` and the Effective Date as the sticky
    /// effective date; everything else is empty.
    pub fn add_row(&mut self) -> usize {
        let mut record = Record::default();
        record.set(Field::EmployeeId, "N");
        record.set(Field::EffectiveDate, self.effective_date.clone());
        self.push(record)
    }

    /// Copies row `index` into `index + 1` with the deduction code and
    /// amount replaced by the configured overrides.
    ///
    /// Returns the index of the new row, or `None` if `index` is out of range.
    pub fn duplicate(&mut self, index: usize) -> Option<usize> {
        let mut copy = self.rows.get(index)?.clone();
        copy.set(Field::DeductionCode, self.overrides.deduction_code.clone());
        copy.set(Field::DeductionAmount, self.overrides.deduction_amount.clone());
        self.rows.insert(index + 1, copy);
        Some(index + 1)
    }

    /// Removes row `index`; a no-op returning `None` if out of range.
    pub fn delete(&mut self, index: usize) -> Option<Record> {
        self.rows.remove(index)
    }

    /// Sets one field of one row.
    pub fn set_field(&mut self, index: usize, field: Field, value: impl Into<String>) -> bool {
        match self.rows.get_mut(index) {
            Some(record) => {
                record.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Applies an effective date to every row and remembers it for new rows.
    ///
    /// Only a `DD-MM-YYYY` shaped value is applied; anything else changes
    /// nothing and returns false.
    pub fn set_effective_date(&mut self, date: &str) -> bool {
        if !Pattern::Date.is_match(date) {
            return false;
        }
        self.effective_date = date.to_string();
        for record in self.rows.iter_mut() {
            record.set(Field::EffectiveDate, date);
        }
        true
    }

    /// Validates every row in order; see `validation::collect_validated`.
    pub fn collect_validated<C: FieldCheck + ?Sized>(&self, check: &C) -> ValidationResult<RecordSet> {
        collect_validated(self.rows.as_slice(), check)
    }
}
