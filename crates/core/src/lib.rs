//! Domain logic for the biogas digester monitor.
//!
//! Everything in this crate is free of HTTP and SQL concerns:
//!
//! - [`metrics`] -- the sensor snapshot value type.
//! - [`alert`] -- alert severities, categories and records.
//! - [`monitoring`] -- the threshold evaluation engine and analysis summary.
//! - [`credentials`] -- the identity record and the credential store seam.

pub mod alert;
pub mod credentials;
pub mod error;
pub mod metrics;
pub mod monitoring;
pub mod types;
