//! CLI module for nben902
//!
//! Provides command-line access to the record file operations:
//! - show, validate, fields: read-only views
//! - add, set, duplicate, delete, set-effective-date: row edits
//! - merge, import-members: bringing rows in from elsewhere
//! - transmit: save and hand the file off

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    add, delete, duplicate, fields, import_members, merge, run, run_command, set,
    set_effective_date, show, transmit_file, validate,
};
pub use errors::{CliError, CliResult};
pub use io::{write_error, write_response};
