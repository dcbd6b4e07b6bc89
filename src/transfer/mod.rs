//! Hand-off of a finished record file to a remote destination
//!
//! Prepare saves the session and checks prerequisites; an `Uploader` moves
//! the bytes. The transfer protocol itself is not implemented here.

mod errors;
mod plan;
mod uploader;

pub use errors::{TransferError, TransferResult};
pub use plan::{Credentials, TransferPlan, TransferTarget};
pub use uploader::{transmit, DirectoryUploader, TransferReceipt, Uploader};
