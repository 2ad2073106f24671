//! Harbor API server library.
//!
//! Exposes config, state, error mapping, handlers, and the router builder so
//! the binary entrypoint and the integration tests share one wiring.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
