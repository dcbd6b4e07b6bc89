//! Record File Format Tests
//!
//! Tests for the on-disk layout:
//! - Every line is 103 Latin-1 bytes plus a newline
//! - Decode(Encode(R)) == R for records that fit their columns
//! - Encode(Decode(L)) == L for canonical lines
//! - Over-wide values are clipped, or refused under the strict width policy

use nben902::codec::{
    decode, encode, parse_file, write_file, write_file_with, CodecErrorCode, WidthPolicy,
};
use nben902::record::{Field, Record, RecordSet, LINE_WIDTH};
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn known_records() -> RecordSet {
    vec![
        Record::from_values(["SCCEA", "SMITH JOHN", "N12345678", "123", "01-01-2024", "", "25.00"]),
        Record::from_values(["SCCEA", "DOE JANE", "N87654321", "407", "01-01-2024", "31-12-2024", "100"]),
        Record::from_values(["OTHER", "ROE RICH", "N00000001", "9", "", "", "0.50"]),
    ]
    .into()
}

fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_every_line_has_canonical_width() {
    let temp_dir = create_temp_dir();
    let path = temp_dir.path().join("deductions.input");

    write_file(&known_records(), &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    let lines: Vec<&[u8]> = bytes.split(|&b| b == b'\n').filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        assert_eq!(line.len(), LINE_WIDTH);
    }
    assert_eq!(bytes.len(), 3 * (LINE_WIDTH + 1));
}

#[test]
fn test_field_offsets_on_disk() {
    let record = Record::from_values(["SCCEA", "SMITH JOHN", "N12345678", "123", "01-01-2024", "", "25.00"]);
    let line = encode(&record);

    assert_eq!(&line[0..10], b"SCCEA     ");
    assert_eq!(&line[60..69], b"N12345678");
    assert_eq!(&line[69..75], b"123   ");
    assert_eq!(&line[75..85], b"01-01-2024");
    assert_eq!(&line[85..95], b"          ");
    assert_eq!(&line[95..103], b"00025.00");
}

// =============================================================================
// Round trips
// =============================================================================

/// Write three known records, re-parse, compare field for field.
#[test]
fn test_write_then_parse_is_identity() {
    let temp_dir = create_temp_dir();
    let path = temp_dir.path().join("deductions.input");
    let original = known_records();

    let written = write_file(&original, &path).unwrap();
    assert_eq!(written, 3);

    let reparsed = parse_file(&path).unwrap();
    assert_eq!(reparsed, original);
}

#[test]
fn test_decode_of_encode_is_identity() {
    for record in known_records() {
        assert_eq!(decode(&encode(&record)), record);
    }
}

#[test]
fn test_encode_of_decode_reproduces_line() {
    let temp_dir = create_temp_dir();
    let path = temp_dir.path().join("deductions.input");
    write_file(&known_records(), &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    for line in bytes.split_inclusive(|&b| b == b'\n') {
        assert_eq!(encode(&decode(line)), line);
    }
}

/// Amount columns carrying odd content still reproduce their bytes.
#[test]
fn test_unusual_amount_columns_reencode_unchanged() {
    let temp_dir = create_temp_dir();
    let path = temp_dir.path().join("amounts.input");
    let amounts = ["5 ", " ", "0", ".5", "0.05", "1 2", "99999.99", "12345678", "7.", "x"];

    let rows: RecordSet = amounts
        .iter()
        .map(|&amount| {
            Record::from_values(["SCCEA", "SMITH JOHN", "N12345678", "123", "", "", amount])
        })
        .collect();
    write_file(&rows, &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    for line in bytes.split_inclusive(|&b| b == b'\n') {
        assert_eq!(encode(&decode(line)), line);
    }
}

#[test]
fn test_latin1_names_survive_round_trip() {
    let record = Record::from_values(["SCCEA", "MUÑOZ JOSÉ", "N12345678", "123", "", "", "1"]);
    let line = encode(&record);
    assert_eq!(line.len(), LINE_WIDTH + 1);
    assert_eq!(decode(&line), record);
}

// =============================================================================
// Tolerated input
// =============================================================================

#[test]
fn test_crlf_short_and_blank_lines_are_tolerated() {
    let temp_dir = create_temp_dir();
    let path = temp_dir.path().join("legacy.input");
    fs::write(&path, b"SCCEA     SMITH JOHN\r\n\nOTHER\n").unwrap();

    let rows = parse_file(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.get(0).unwrap().name, "SMITH JOHN");
    assert_eq!(rows.get(0).unwrap().deduction_amount, "");
    assert_eq!(rows.get(1).unwrap().agency_code, "OTHER");
}

#[test]
fn test_missing_file_reports_read_failure() {
    let temp_dir = create_temp_dir();
    let err = parse_file(&temp_dir.path().join("absent.input")).unwrap_err();
    assert_eq!(err.code(), CodecErrorCode::ReadFailed);
    assert!(err.is_io());
}

// =============================================================================
// Over-wide values
// =============================================================================

#[test]
fn test_overflow_is_clipped_by_default() {
    let mut record = known_records().get(0).unwrap().clone();
    record.set(Field::AgencyCode, "ABCDEFGHIJKLMNOP");

    let line = encode(&record);
    assert_eq!(line.len(), LINE_WIDTH + 1);
    assert_eq!(decode(&line).agency_code, "ABCDEFGHIJ");
}

#[test]
fn test_strict_policy_refuses_and_writes_nothing() {
    let temp_dir = create_temp_dir();
    let path = temp_dir.path().join("strict.input");

    let mut rows = known_records();
    rows.get_mut(2).unwrap().set(Field::DeductionCode, "1234567");

    let err = write_file_with(&rows, &path, WidthPolicy::Reject).unwrap_err();
    assert_eq!(err.code(), CodecErrorCode::FieldOverflow);
    assert_eq!(err.field(), Some(Field::DeductionCode));
    assert!(!path.exists());
}
