//! Fixed-width line encoding and decoding
//!
//! Lines use a single byte per character. Bytes are mapped to chars as
//! Latin-1, so a decoded value always has as many chars as the bytes it
//! came from, and encoding maps them back one to one.

use crate::record::{Alignment, Field, Record, LINE_WIDTH};

use super::errors::{CodecError, CodecResult};

/// Replacement byte for characters that have no single-byte form
const UNMAPPABLE: u8 = b'?';

/// Decodes one line into a record.
///
/// The line may or may not carry its `\n` / `\r\n` terminator. Short lines
/// are accepted: fields past the end of the line come back empty, and a
/// field cut by the end of the line keeps whatever is there. Only padding is
/// removed: trailing spaces on left-aligned fields and the leading zero fill
/// on the amount. Nothing is validated.
pub fn decode(line: &[u8]) -> Record {
    let line = strip_terminator(line);
    let mut record = Record::default();

    for field in Field::ALL {
        let range = field.range();
        let start = range.start.min(line.len());
        let end = range.end.min(line.len());
        let raw = latin1_to_string(&line[start..end]);
        record.set(field, unpad(field, &raw));
    }

    record
}

/// Encodes a record into one line, terminator included.
///
/// Values wider than their column are clipped to the column width.
pub fn encode(record: &Record) -> Vec<u8> {
    let mut line = Vec::with_capacity(LINE_WIDTH + 1);
    for (field, value) in record.values() {
        line.extend(encode_field(field, value));
    }
    line.push(b'\n');
    line
}

/// Encodes a record, rejecting any value wider than its column.
///
/// `row` is only used to locate the failure in the error.
pub fn encode_checked(record: &Record, row: Option<usize>) -> CodecResult<Vec<u8>> {
    for (field, value) in record.values() {
        let len = value.chars().count();
        if len > field.width() {
            return Err(CodecError::field_overflow(row, field, len));
        }
    }
    Ok(encode(record))
}

/// Encodes a single field to exactly `field.width()` bytes.
pub fn encode_field(field: Field, value: &str) -> Vec<u8> {
    let width = field.width();

    if field.is_date() && value.is_empty() {
        return vec![b' '; width];
    }

    let bytes = string_to_latin1(value);
    let mut out = Vec::with_capacity(width.max(bytes.len()));
    let fill = field.alignment().fill_char() as u8;
    let pad = width.saturating_sub(bytes.len());

    match field.alignment() {
        Alignment::Left => {
            out.extend_from_slice(&bytes);
            out.resize(bytes.len() + pad, fill);
        }
        Alignment::ZeroFill => {
            out.resize(pad, fill);
            out.extend_from_slice(&bytes);
        }
    }

    // Pad first, then clip: an over-wide value loses its tail.
    out.truncate(width);
    out
}

fn unpad(field: Field, raw: &str) -> String {
    match field.alignment() {
        Alignment::Left => raw.trim_end_matches(' ').to_string(),
        Alignment::ZeroFill => strip_zero_fill(raw),
    }
}

/// Removes the leading zero fill from an amount column.
///
/// `"00000100"` -> `"100"`, `"00000.50"` -> `"0.50"`, `"00000000"` -> `"0"`.
/// Anything after the fill is kept as is, trailing spaces included, so the
/// value encodes back to the same bytes.
fn strip_zero_fill(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let stripped = raw.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else if stripped.starts_with('.') && stripped.len() < raw.len() {
        format!("0{}", stripped)
    } else {
        stripped.to_string()
    }
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Maps each byte to the char with the same code point.
pub fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Maps each char to one byte; chars above U+00FF become `?`.
pub fn string_to_latin1(value: &str) -> Vec<u8> {
    value
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(UNMAPPABLE))
        .collect()
}

/// Upper-cases without leaving Latin-1.
///
/// A char whose upper case is several chars or lies above U+00FF is kept
/// unchanged: `ß`, `ÿ` and `µ` stay as they are.
pub fn latin1_uppercase(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) if u32::from(u) <= 0xFF => u,
                _ => c,
            }
        })
        .collect()
}
