//! Field definitions for the NBEN902 deduction layout
//!
//! Column order is fixed and is the on-disk order:
//! Agency Code, Name, Employee ID, Deduction Code, Effective Date,
//! Deduction End Date, Deduction Amount.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a value is placed inside its fixed-width column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Left-aligned, padded on the right with spaces
    Left,
    /// Right-aligned, filled on the left with `'0'`
    ZeroFill,
}

impl Alignment {
    /// Returns the pad character for this alignment
    pub fn fill_char(&self) -> char {
        match self {
            Alignment::Left => ' ',
            Alignment::ZeroFill => '0',
        }
    }
}

/// One of the seven named slots of a deduction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    AgencyCode,
    Name,
    EmployeeId,
    DeductionCode,
    EffectiveDate,
    DeductionEndDate,
    DeductionAmount,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 7] = [
        Field::AgencyCode,
        Field::Name,
        Field::EmployeeId,
        Field::DeductionCode,
        Field::EffectiveDate,
        Field::DeductionEndDate,
        Field::DeductionAmount,
    ];

    /// Column index of this field
    pub fn index(&self) -> usize {
        match self {
            Field::AgencyCode => 0,
            Field::Name => 1,
            Field::EmployeeId => 2,
            Field::DeductionCode => 3,
            Field::EffectiveDate => 4,
            Field::DeductionEndDate => 5,
            Field::DeductionAmount => 6,
        }
    }

    /// Display name, as printed on form labels and in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Field::AgencyCode => "Agency Code",
            Field::Name => "Name",
            Field::EmployeeId => "Employee ID",
            Field::DeductionCode => "Deduction Code",
            Field::EffectiveDate => "Effective Date",
            Field::DeductionEndDate => "Deduction End Date",
            Field::DeductionAmount => "Deduction Amount",
        }
    }

    /// On-disk width in bytes.
    ///
    /// Employee ID is held at 9 bytes, which makes every line 103 bytes.
    pub fn width(&self) -> usize {
        match self {
            Field::AgencyCode => 10,
            Field::Name => 50,
            Field::EmployeeId => 9,
            Field::DeductionCode => 6,
            Field::EffectiveDate => 10,
            Field::DeductionEndDate => 10,
            Field::DeductionAmount => 8,
        }
    }

    /// Byte offset of the first column of this field
    pub fn offset(&self) -> usize {
        Field::ALL[..self.index()].iter().map(|f| f.width()).sum()
    }

    /// Byte range `[offset, offset + width)` within a line
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.offset();
        start..start + self.width()
    }

    pub fn alignment(&self) -> Alignment {
        match self {
            Field::DeductionAmount => Alignment::ZeroFill,
            _ => Alignment::Left,
        }
    }

    /// Date columns write a blank value as a run of spaces, never zeros.
    pub fn is_date(&self) -> bool {
        matches!(self, Field::EffectiveDate | Field::DeductionEndDate)
    }

    /// Help text shown next to the field label, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Field::AgencyCode => Some(
                "Agency Code for Suffolk County is 05527\nAgency Code for the Academy is 05007",
            ),
            Field::DeductionCode => Some("456 for union dues\n407 for the PAC fund"),
            Field::EffectiveDate => Some("The Thursday after the last payday"),
            Field::DeductionEndDate => Some("Can be the Thursday after the last payday"),
            _ => None,
        }
    }

    /// Looks a field up by display name, ignoring ASCII case and
    /// treating `-`/`_` as spaces.
    pub fn from_name(name: &str) -> Option<Field> {
        let wanted: String = name
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect();
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(&wanted))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Total byte width of one encoded line, excluding the terminator
pub const LINE_WIDTH: usize = 103;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_match_layout() {
        let offsets: Vec<usize> = Field::ALL.iter().map(|f| f.offset()).collect();
        assert_eq!(offsets, vec![0, 10, 60, 69, 75, 85, 95]);
        assert_eq!(Field::DeductionAmount.range(), 95..103);
    }

    #[test]
    fn test_widths_sum_to_line_width() {
        let total: usize = Field::ALL.iter().map(|f| f.width()).sum();
        assert_eq!(total, LINE_WIDTH);
    }

    #[test]
    fn test_from_name_is_lenient() {
        assert_eq!(Field::from_name("Employee ID"), Some(Field::EmployeeId));
        assert_eq!(Field::from_name("employee-id"), Some(Field::EmployeeId));
        assert_eq!(Field::from_name("DEDUCTION_END_DATE"), Some(Field::DeductionEndDate));
        assert_eq!(Field::from_name("Salary"), None);
    }

    #[test]
    fn test_only_amount_is_zero_filled() {
        for field in Field::ALL {
            let expected = if field == Field::DeductionAmount {
                Alignment::ZeroFill
            } else {
                Alignment::Left
            };
            assert_eq!(field.alignment(), expected);
        }
    }
}
