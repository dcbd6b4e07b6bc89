//! Record model for NBEN902 deduction files
//!
//! A record is seven text fields in a fixed column order. A record set is
//! the ordered list of records being edited; its order is the file order.

mod field;
mod types;

pub use field::{Alignment, Field, LINE_WIDTH};
pub use types::{Record, RecordSet};
