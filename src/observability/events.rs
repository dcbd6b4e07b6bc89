//! Observable events
//!
//! Every log line names one of these.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    ConfigLoaded,

    // Record file
    RecordsLoaded,
    RecordsMerged,
    RecordsWritten,
    WriteFailed,

    // Row edits
    RowAdded,
    RowDuplicated,
    RowDeleted,
    RowUpdated,
    EffectiveDateApplied,
    MembersImported,

    // Validation
    ValidationFailed,

    // Transfer
    TransferBegin,
    TransferProgress,
    TransferComplete,
    TransferRefused,
    TransferFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::RecordsLoaded => "RECORDS_LOADED",
            Event::RecordsMerged => "RECORDS_MERGED",
            Event::RecordsWritten => "RECORDS_WRITTEN",
            Event::WriteFailed => "RECORDS_WRITE_FAILED",

            Event::RowAdded => "ROW_ADDED",
            Event::RowDuplicated => "ROW_DUPLICATED",
            Event::RowDeleted => "ROW_DELETED",
            Event::RowUpdated => "ROW_UPDATED",
            Event::EffectiveDateApplied => "EFFECTIVE_DATE_APPLIED",
            Event::MembersImported => "MEMBERS_IMPORTED",

            Event::ValidationFailed => "VALIDATION_FAILED",

            Event::TransferBegin => "TRANSFER_BEGIN",
            Event::TransferProgress => "TRANSFER_PROGRESS",
            Event::TransferComplete => "TRANSFER_COMPLETE",
            Event::TransferRefused => "TRANSFER_REFUSED",
            Event::TransferFailed => "TRANSFER_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
