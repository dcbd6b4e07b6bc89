//! Record and RecordSet types

use serde::{Deserialize, Serialize};

use super::field::Field;

/// One payroll deduction line.
///
/// Values are kept as the raw text the user typed or the codec decoded.
/// Nothing here validates; see `validation` for that boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub agency_code: String,
    pub name: String,
    pub employee_id: String,
    pub deduction_code: String,
    pub effective_date: String,
    pub deduction_end_date: String,
    pub deduction_amount: String,
}

impl Record {
    /// Builds a record from values in column order.
    pub fn from_values(values: [&str; 7]) -> Self {
        let mut record = Record::default();
        for (field, value) in Field::ALL.iter().zip(values) {
            record.set(*field, value);
        }
        record
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::AgencyCode => &self.agency_code,
            Field::Name => &self.name,
            Field::EmployeeId => &self.employee_id,
            Field::DeductionCode => &self.deduction_code,
            Field::EffectiveDate => &self.effective_date,
            Field::DeductionEndDate => &self.deduction_end_date,
            Field::DeductionAmount => &self.deduction_amount,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::AgencyCode => self.agency_code = value,
            Field::Name => self.name = value,
            Field::EmployeeId => self.employee_id = value,
            Field::DeductionCode => self.deduction_code = value,
            Field::EffectiveDate => self.effective_date = value,
            Field::DeductionEndDate => self.deduction_end_date = value,
            Field::DeductionAmount => self.deduction_amount = value,
        }
    }

    /// Iterates `(field, value)` pairs in column order
    pub fn values(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL.iter().map(move |f| (*f, self.get(*f)))
    }
}

/// Ordered collection of records. Order is the on-disk row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.records.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Record> {
        self.records.iter_mut()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Inserts at `index`, shifting later rows down by one.
    ///
    /// Returns false without changing anything if `index > len`.
    pub fn insert(&mut self, index: usize, record: Record) -> bool {
        if index > self.records.len() {
            return false;
        }
        self.records.insert(index, record);
        true
    }

    /// Removes the row at `index`, or returns `None` if out of range.
    pub fn remove(&mut self, index: usize) -> Option<Record> {
        if index >= self.records.len() {
            return None;
        }
        Some(self.records.remove(index))
    }

    /// Appends every row of `other`, keeping its order
    pub fn extend(&mut self, other: RecordSet) {
        self.records.extend(other.records);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn into_vec(self) -> Vec<Record> {
        self.records
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
