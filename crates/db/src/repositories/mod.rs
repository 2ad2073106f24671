//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod emp_repo;
pub mod record_repo;

pub use emp_repo::{BulkImportError, EmpRepo};
pub use record_repo::RecordRepo;
