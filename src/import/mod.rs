//! Member import: turns selected rows of a member sheet into records

mod errors;
mod member;

pub use errors::{ImportError, ImportResult};
pub use member::{MemberSheet, EMPLOYEE_ID_FALLBACK_COLUMN};
