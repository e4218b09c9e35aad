//! Threshold evaluation engine for digester metrics.
//!
//! Pure logic. The caller obtains a [`MetricSnapshot`] from telemetry and
//! receives the classified alerts; surfacing notifications is up to the caller.

use std::fmt;

use crate::alert::{AlertCategory, AlertRecord, Notification, Severity};
use crate::metrics::MetricSnapshot;

/// Lower bound of the optimal pH band (inclusive).
pub const PH_MIN: f64 = 6.5;
/// Upper bound of the optimal pH band (inclusive).
pub const PH_MAX: f64 = 7.5;
/// Gas production below this raises a warning (m³/day).
pub const GAS_PRODUCTION_MIN: f64 = 60.0;
/// Gas production at or above this counts as good in the summary (m³/day).
pub const GAS_PRODUCTION_GOOD: f64 = 75.0;
/// Mesophilic operating band (°C).
pub const TEMPERATURE_MIN: f64 = 35.0;
pub const TEMPERATURE_MAX: f64 = 40.0;
/// Waste level above this suggests maintenance (%).
pub const WASTE_LEVEL_MAX: f64 = 85.0;

/// How long a critical notification stays on screen.
pub const CRITICAL_NOTIFICATION_MS: u64 = 5_000;

/// A metric value rendered the way the dashboard prints numbers.
///
/// Shortest round-trip digits, `0` for negative zero, and exponent form
/// (`1e+21`, `1e-7`) outside `[1e-6, 1e21)`.
#[derive(Debug, Clone, Copy)]
pub struct Reading(pub f64);

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value == 0.0 {
            return f.write_str("0");
        }
        if value.is_nan() {
            return f.write_str("NaN");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
        }

        let magnitude = value.abs();
        if magnitude >= 1e21 || magnitude < 1e-6 {
            let exp_form = format!("{value:e}");
            return match exp_form.split_once('e') {
                Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                    write!(f, "{mantissa}e+{exponent}")
                }
                _ => f.write_str(&exp_form),
            };
        }
        write!(f, "{value}")
    }
}

/// Evaluate a snapshot and return every applicable alert.
///
/// Categories are checked in a fixed order (pH, gas production, temperature,
/// waste level) and each contributes at most one record. When nothing
/// triggers, a single `Success` record is returned, so the result is never
/// empty.
pub fn evaluate(snapshot: &MetricSnapshot) -> Vec<AlertRecord> {
    let mut alerts = Vec::new();

    if let Some(alert) = check_ph(snapshot.ph) {
        alerts.push(alert);
    }

    if snapshot.gas_production < GAS_PRODUCTION_MIN {
        alerts.push(AlertRecord::new(
            Severity::Warning,
            AlertCategory::GasProduction,
            "Low Gas Production",
            format_args!("Current production: {} m³/day", Reading(snapshot.gas_production)),
        ));
    }

    if snapshot.temperature < TEMPERATURE_MIN || snapshot.temperature > TEMPERATURE_MAX {
        alerts.push(AlertRecord::new(
            Severity::Warning,
            AlertCategory::Temperature,
            "Temperature Alert",
            format_args!(
                "Temperature is {}°C, outside optimal range",
                Reading(snapshot.temperature)
            ),
        ));
    }

    if snapshot.waste_level > WASTE_LEVEL_MAX {
        alerts.push(AlertRecord::new(
            Severity::Info,
            AlertCategory::WasteLevel,
            "High Waste Level",
            format_args!(
                "Waste level at {}% - consider maintenance",
                Reading(snapshot.waste_level)
            ),
        ));
    }

    if alerts.is_empty() {
        alerts.push(AlertRecord::new(
            Severity::Success,
            AlertCategory::Nominal,
            "All Systems Normal",
            "All parameters are within optimal ranges",
        ));
    }

    alerts
}

/// First-match pH check. Both bounds are strict, so 6.5 and 7.5 are optimal.
fn check_ph(value: f64) -> Option<AlertRecord> {
    let ph = Reading(value);
    if value < PH_MIN {
        Some(AlertRecord::new(
            Severity::Critical,
            AlertCategory::Ph,
            "Low pH Alert",
            format_args!("pH level is {ph}, below optimal range ({PH_MIN}-{PH_MAX})"),
        ))
    } else if value > PH_MAX {
        Some(AlertRecord::new(
            Severity::Critical,
            AlertCategory::Ph,
            "High pH Alert",
            format_args!("pH level is {ph}, above optimal range ({PH_MIN}-{PH_MAX})"),
        ))
    } else {
        None
    }
}

/// Build the one-line quick analysis shown beneath the alert list.
pub fn summarize(snapshot: &MetricSnapshot) -> String {
    let ph = Reading(snapshot.ph);
    let gas = Reading(snapshot.gas_production);

    let ph_part = if (PH_MIN..=PH_MAX).contains(&snapshot.ph) {
        format!("pH optimal at {ph}.")
    } else {
        format!("pH needs attention at {ph}.")
    };

    let gas_part = if snapshot.gas_production >= GAS_PRODUCTION_GOOD {
        format!("Good gas production at {gas} m³/day.")
    } else {
        format!("Gas production could be improved ({gas} m³/day).")
    };

    format!("{ph_part} {gas_part}")
}

/// Transient notifications the caller should surface, one per critical alert.
pub fn notifications(alerts: &[AlertRecord]) -> Vec<Notification> {
    alerts
        .iter()
        .filter(|a| a.severity == Severity::Critical)
        .map(|a| Notification {
            message: a.message.clone(),
            duration_ms: CRITICAL_NOTIFICATION_MS,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
