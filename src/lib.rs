//! nben902 - editor and validator for fixed-width NBEN902 deduction files
//!
//! A file is a sequence of 103-byte Latin-1 records, one per line. Rows are
//! edited through a `session::Session`, checked by `validation` before every
//! save and written by `codec`.

pub mod cli;
pub mod codec;
pub mod config;
pub mod import;
pub mod observability;
pub mod record;
pub mod session;
pub mod store;
pub mod transfer;
pub mod validation;
