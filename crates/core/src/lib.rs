//! Domain building blocks shared by the database and HTTP layers.

pub mod error;
pub mod extraction;
pub mod static_site;
pub mod types;
pub mod validation;
