//! Record file writer
//!
//! Overwrites the target file. The write is not atomic: a failure part way
//! leaves a partial file, and the caller still holds the rows to retry with.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::record::{Record, RecordSet};

use super::errors::{CodecError, CodecResult};
use super::line::{encode, encode_checked};

/// Width handling for values longer than their column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthPolicy {
    /// Clip the value to the column width
    #[default]
    Truncate,
    /// Refuse to write and report the field
    Reject,
}

/// Buffered writer for a record file.
pub struct RecordWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    policy: WidthPolicy,
    /// Records written so far
    written: usize,
}

impl RecordWriter {
    /// Creates (or truncates) the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `NBEN_CODEC_WRITE_FAILED` if the file cannot be created.
    pub fn create(path: &Path, policy: WidthPolicy) -> CodecResult<Self> {
        let file = File::create(path).map_err(|e| CodecError::write_failed(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            policy,
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Encodes and writes one record.
    pub fn append(&mut self, record: &Record) -> CodecResult<()> {
        let line = match self.policy {
            WidthPolicy::Truncate => encode(record),
            WidthPolicy::Reject => encode_checked(record, Some(self.written))?,
        };
        self.writer
            .write_all(&line)
            .map_err(|e| CodecError::write_failed(&self.path, e))?;
        self.written += 1;
        Ok(())
    }

    /// Flushes buffered output to disk.
    pub fn finish(mut self) -> CodecResult<usize> {
        self.writer
            .flush()
            .map_err(|e| CodecError::write_failed(&self.path, e))?;
        Ok(self.written)
    }
}

/// Writes every record in order, clipping over-wide values.
///
/// # Errors
///
/// Returns `NBEN_CODEC_WRITE_FAILED` on any I/O failure.
pub fn write_file(records: &RecordSet, path: &Path) -> CodecResult<usize> {
    write_file_with(records, path, WidthPolicy::Truncate)
}

/// Writes every record in order with the given width policy.
///
/// With `WidthPolicy::Reject` the file is only created once every record
/// is known to fit, so an overflow never leaves a partial file behind.
pub fn write_file_with(records: &RecordSet, path: &Path, policy: WidthPolicy) -> CodecResult<usize> {
    if policy == WidthPolicy::Reject {
        for (row, record) in records.iter().enumerate() {
            encode_checked(record, Some(row))?;
        }
    }

    let mut writer = RecordWriter::create(path, policy)?;
    for record in records {
        writer.append(record)?;
    }
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;
    use std::fs;
    use tempfile::TempDir;

    fn row(name: &str) -> Record {
        Record::from_values(["05527", name, "N12345678", "456", "", "", "10"])
    }

    #[test]
    fn test_write_overwrites_existing_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.input");
        fs::write(&path, "stale content that is much longer than nothing\n".repeat(10)).unwrap();

        let set: RecordSet = vec![row("A")].into();
        assert_eq!(write_file(&set, &path).unwrap(), 1);

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 104);
    }

    #[test]
    fn test_reject_policy_leaves_no_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.input");

        let mut bad = row("B");
        bad.set(Field::AgencyCode, "05527055270");
        let set: RecordSet = vec![row("A"), bad].into();

        let err = write_file_with(&set, &path, WidthPolicy::Reject).unwrap_err();
        assert_eq!(err.field(), Some(Field::AgencyCode));
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_path_is_write_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("no-such-dir").join("out.input");
        let err = write_file(&RecordSet::new(), &path).unwrap_err();
        assert!(err.is_io());
    }
}
