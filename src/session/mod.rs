//! Editing session: rows, current file and save policy in one owned value

mod errors;
#[allow(clippy::module_inception)]
mod session;

pub use errors::{SessionError, SessionResult};
pub use session::{OpenMode, Session};
