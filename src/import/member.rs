//! Member sheet import
//!
//! A member sheet is what a spreadsheet reader hands over: a header row
//! followed by data rows, every cell as a value. On disk it is a JSON array
//! of arrays. Reading the spreadsheet itself happens elsewhere.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::codec::latin1_uppercase;
use crate::record::{Field, Record};
use crate::store::DuplicateOverrides;

use super::errors::{ImportError, ImportResult};

/// Zero-based column holding the employee ID when no header names it
pub const EMPLOYEE_ID_FALLBACK_COLUMN: usize = 5;

/// Header row plus data rows of text cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSheet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MemberSheet {
    /// Loads a sheet from a JSON file.
    pub fn load(path: &Path) -> ImportResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ImportError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> ImportResult<Self> {
        let rows: Vec<Vec<Value>> =
            serde_json::from_str(content).map_err(|e| ImportError::Malformed(e.to_string()))?;
        Self::from_cells(rows)
    }

    /// Builds a sheet from raw cells; the first row is the header.
    pub fn from_cells(cells: Vec<Vec<Value>>) -> ImportResult<Self> {
        let mut iter = cells.into_iter();
        let headers: Vec<String> = iter
            .next()
            .ok_or(ImportError::EmptySheet)?
            .iter()
            .map(cell_text)
            .collect();
        let rows: Vec<Vec<String>> = iter
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        if rows.is_empty() {
            return Err(ImportError::EmptySheet);
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the "Name" cell of every row, for picking members.
    pub fn names(&self) -> Vec<&str> {
        let column = self.column_of(Field::Name);
        self.rows
            .iter()
            .map(|row| column.and_then(|c| row.get(c)).map_or("", String::as_str))
            .collect()
    }

    /// Builds records for the selected rows, in selection order.
    ///
    /// Named columns that match a field are copied. Deduction Code and
    /// Deduction Amount default to `defaults`; Employee ID falls back to the
    /// sixth column. Other fields stay empty. Names are upper-cased.
    pub fn select(&self, selection: &[usize], defaults: &DuplicateOverrides) -> ImportResult<Vec<Record>> {
        if selection.is_empty() {
            return Err(ImportError::NoSelection);
        }
        selection
            .iter()
            .map(|&index| self.to_record(index, defaults))
            .collect()
    }

    fn to_record(&self, index: usize, defaults: &DuplicateOverrides) -> ImportResult<Record> {
        let row = self.rows.get(index).ok_or(ImportError::RowOutOfRange(index))?;
        let mut record = Record::default();

        for field in Field::ALL {
            let value = match self.column_of(field) {
                Some(column) => row.get(column).cloned().unwrap_or_default(),
                None => match field {
                    Field::DeductionCode => defaults.deduction_code.clone(),
                    Field::DeductionAmount => defaults.deduction_amount.clone(),
                    Field::EmployeeId => row
                        .get(EMPLOYEE_ID_FALLBACK_COLUMN)
                        .cloned()
                        .ok_or(ImportError::MissingColumn {
                            row: index,
                            column: EMPLOYEE_ID_FALLBACK_COLUMN,
                        })?,
                    _ => String::new(),
                },
            };
            record.set(field, value);
        }

        record.name = latin1_uppercase(&record.name);
        Ok(record)
    }

    fn column_of(&self, field: Field) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| Field::from_name(h) == Some(field))
    }
}

/// Renders a cell as text. Empty cells become empty strings.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => match n.as_f64() {
            // Spreadsheets hand whole numbers over as floats
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
