//! Record file reader
//!
//! Reads a fixed-width deduction file line by line. Short lines are not
//! errors; blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::record::{Record, RecordSet};

use super::errors::{CodecError, CodecResult};
use super::line::decode;

/// Sequential reader over a record file.
pub struct RecordReader {
    /// Path to the file being read
    path: PathBuf,
    reader: BufReader<File>,
    /// Number of physical lines consumed so far
    line_number: usize,
}

impl RecordReader {
    /// Opens a record file for reading.
    ///
    /// # Errors
    ///
    /// Returns `NBEN_CODEC_READ_FAILED` if the file cannot be opened.
    pub fn open(path: &Path) -> CodecResult<Self> {
        let file = File::open(path).map_err(|e| CodecError::read_failed(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            line_number: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` for the next non-blank line
    /// - `Ok(None)` at end of file
    pub fn read_next(&mut self) -> CodecResult<Option<Record>> {
        let mut buf = Vec::with_capacity(128);
        loop {
            buf.clear();
            let read = self
                .reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| CodecError::read_failed(&self.path, e))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            if is_blank(&buf) {
                continue;
            }
            return Ok(Some(decode(&buf)));
        }
    }

    /// Reads every remaining record.
    pub fn read_all(&mut self) -> CodecResult<RecordSet> {
        let mut records = RecordSet::new();
        while let Some(record) = self.read_next()? {
            records.push(record);
        }
        Ok(records)
    }
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
}

/// Parses a whole record file.
///
/// # Errors
///
/// Returns `NBEN_CODEC_READ_FAILED` if the path cannot be opened or read.
pub fn parse_file(path: &Path) -> CodecResult<RecordSet> {
    RecordReader::open(path)?.read_all()
}
