//! In-memory row store for one editing session

mod row_store;

pub use row_store::{DuplicateOverrides, RowStore};
