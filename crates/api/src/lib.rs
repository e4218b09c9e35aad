//! Biogas monitor API server library.
//!
//! Exposes the building blocks (config, state, error handling, auth service,
//! routes) so integration tests and the binary entrypoint can both use them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
