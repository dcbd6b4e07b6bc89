//! Fixed-width record codec
//!
//! Converts between the on-disk NBEN902 line format and `Record`.
//!
//! # Line layout
//!
//! | Field              | Bytes      | Fill          |
//! |--------------------|------------|---------------|
//! | Agency Code        | `[0,10)`   | spaces, right |
//! | Name               | `[10,60)`  | spaces, right |
//! | Employee ID        | `[60,69)`  | spaces, right |
//! | Deduction Code     | `[69,75)`  | spaces, right |
//! | Effective Date     | `[75,85)`  | spaces, right |
//! | Deduction End Date | `[85,95)`  | spaces, right |
//! | Deduction Amount   | `[95,103)` | zeros, left   |
//!
//! Each line is followed by a single `\n`.
//!
//! # Guarantees
//!
//! - `encode(decode(line)) == line` for any line produced by `encode`
//! - `decode(encode(record)) == record` when no value exceeds its width,
//!   carries trailing spaces, or (for the amount) leading zeros

mod errors;
mod line;
mod reader;
mod writer;

pub use errors::{CodecError, CodecErrorCode, CodecResult};
pub use line::{
    decode, encode, encode_checked, encode_field, latin1_to_string, latin1_uppercase,
    string_to_latin1,
};
pub use reader::{parse_file, RecordReader};
pub use writer::{write_file, write_file_with, RecordWriter, WidthPolicy};
