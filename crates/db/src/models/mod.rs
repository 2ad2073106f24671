//! Row models and request DTOs.
//!
//! - `record` holds the shared row shape, audit stamps, and liveness tag
//! - `master` holds the master-data entity descriptors
//! - `emp` holds the bulk-loadable shipment entity

pub mod emp;
pub mod master;
pub mod record;
