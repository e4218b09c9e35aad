//! Digester metric snapshot.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// One timestamped set of sensor-derived digester readings.
///
/// Produced by an external telemetry source; the engine only reads it.
/// Field names on the wire match the dashboard (`pH`, `gasProduction`, ...).
/// Values are not range-checked: out-of-range readings are evaluated with the
/// same comparisons as any other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSnapshot {
    /// Client-side reading identifier, if the source assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "pH")]
    pub ph: f64,
    /// Biogas output in m³/day.
    pub gas_production: f64,
    /// Digester temperature in °C.
    pub temperature: f64,
    /// Headspace pressure in bar.
    pub pressure: f64,
    /// Feed tank fill level in percent.
    pub waste_level: f64,
    pub timestamp: Timestamp,
}
