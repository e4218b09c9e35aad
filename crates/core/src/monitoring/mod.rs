//! Digester monitoring domain logic.
//!
//! Contains the threshold evaluation engine and the quick-analysis summary.
//! All logic in this module is pure (no DB access, no I/O) so it can be
//! called concurrently and tested in isolation.

pub mod thresholds;

pub use thresholds::{evaluate, notifications, summarize};
