//! Editing session
//!
//! The session owns everything one editor window used to keep in globals:
//! the rows, the current file path and the save policy. The codec and the
//! row store stay stateless with respect to it.

use std::path::{Path, PathBuf};

use crate::codec::{encode, parse_file, write_file_with, WidthPolicy};
use crate::config::EditorConfig;
use crate::observability::{Event, Logger};
use crate::record::RecordSet;
use crate::store::RowStore;
use crate::validation::{ValidationError, Validator};

use super::errors::{SessionError, SessionResult};

/// What `open` did with the rows already in the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Rows from the file replaced the session rows
    Replaced,
    /// Rows from the file were appended after the session rows
    Merged,
}

pub struct Session {
    store: RowStore,
    path: Option<PathBuf>,
    default_filename: String,
    width_policy: WidthPolicy,
    validator: Validator,
}

impl Session {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            store: RowStore::with_overrides(config.duplicate_overrides()),
            path: None,
            default_filename: config.default_filename.clone(),
            width_policy: config.width_policy(),
            validator: Validator::new(),
        }
    }

    /// Creates a session holding the rows of `path`.
    pub fn open_file(config: &EditorConfig, path: &Path) -> SessionResult<Self> {
        let mut session = Self::new(config);
        session.open(path)?;
        Ok(session)
    }

    pub fn store(&self) -> &RowStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RowStore {
        &mut self.store
    }

    pub fn rows(&self) -> &RecordSet {
        self.store.rows()
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Current file path, if the session has been opened or saved
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn default_filename(&self) -> &str {
        &self.default_filename
    }

    /// Opens a record file.
    ///
    /// If the session already holds rows that all validate, the file's rows
    /// are appended after them. Otherwise the file's rows replace them.
    /// Either way the session now points at `path`.
    pub fn open(&mut self, path: &Path) -> SessionResult<OpenMode> {
        let loaded = parse_file(path)?;
        let count = loaded.len().to_string();

        let current = if self.store.is_empty() {
            None
        } else {
            self.store.collect_validated(&self.validator).ok()
        };

        let mode = match current {
            Some(current) => {
                self.store.load(current);
                self.store.merge(loaded);
                OpenMode::Merged
            }
            None => {
                self.store.load(loaded);
                OpenMode::Replaced
            }
        };

        self.path = Some(path.to_path_buf());
        let event = match mode {
            OpenMode::Merged => Event::RecordsMerged,
            OpenMode::Replaced => Event::RecordsLoaded,
        };
        Logger::info(
            event,
            &[("path", path.display().to_string().as_str()), ("rows", count.as_str())],
        );
        Ok(mode)
    }

    /// Appends the rows of another file without changing the session path.
    pub fn merge_file(&mut self, path: &Path) -> SessionResult<usize> {
        let loaded = parse_file(path)?;
        let count = loaded.len();
        self.store.merge(loaded);
        Logger::info(
            Event::RecordsMerged,
            &[
                ("path", path.display().to_string().as_str()),
                ("rows", count.to_string().as_str()),
            ],
        );
        Ok(count)
    }

    /// Validates and writes to the current path.
    pub fn save(&mut self) -> SessionResult<PathBuf> {
        let path = self.path.clone().ok_or(SessionError::NoDestination)?;
        self.save_as(&path)?;
        Ok(path)
    }

    /// Validates every row, writes them to `path` and makes `path` current.
    ///
    /// Nothing is written when a row fails validation.
    pub fn save_as(&mut self, path: &Path) -> SessionResult<usize> {
        let validated = self.validated()?;

        let written = write_file_with(&validated, path, self.width_policy).map_err(|e| {
            Logger::error(
                Event::WriteFailed,
                &[("path", path.display().to_string().as_str()), ("error", e.to_string().as_str())],
            );
            e
        })?;

        self.store.load(validated);
        self.path = Some(path.to_path_buf());
        Logger::info(
            Event::RecordsWritten,
            &[
                ("path", path.display().to_string().as_str()),
                ("rows", written.to_string().as_str()),
            ],
        );
        Ok(written)
    }

    /// Rows as they would be written, or the first validation failure.
    pub fn validated(&self) -> Result<RecordSet, ValidationError> {
        self.store.collect_validated(&self.validator).map_err(|e| {
            Logger::warn(
                Event::ValidationFailed,
                &[
                    ("field", e.field().name()),
                    ("row", (e.row() + 1).to_string().as_str()),
                ],
            );
            e
        })
    }

    /// True when closing now would lose edits.
    ///
    /// Rows must validate first; the check compares the lines the rows would
    /// be written as with the lines of the current file. A session with no file has
    /// unsaved changes whenever it has rows.
    pub fn has_unsaved_changes(&self) -> SessionResult<bool> {
        let validated = self.validated()?;
        match &self.path {
            Some(path) => {
                let on_disk = parse_file(path)?;
                Ok(encoded(&on_disk) != encoded(&validated))
            }
            None => Ok(!validated.is_empty()),
        }
    }
}

fn encoded(rows: &RecordSet) -> Vec<Vec<u8>> {
    rows.iter().map(encode).collect()
}
