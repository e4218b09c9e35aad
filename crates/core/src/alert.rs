//! Alert types produced by the digester threshold engine.

use serde::Serialize;

/// Severity level of an alert record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Process is at risk; the client must raise a transient notification.
    Critical,
    Warning,
    Info,
    /// Synthetic all-clear record.
    Success,
}

/// The metric family an alert was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertCategory {
    #[serde(rename = "pH")]
    Ph,
    #[serde(rename = "gasProduction")]
    GasProduction,
    #[serde(rename = "temperature")]
    Temperature,
    #[serde(rename = "wasteLevel")]
    WasteLevel,
    /// Used only by the all-clear record.
    #[serde(rename = "nominal")]
    Nominal,
}

impl AlertCategory {
    /// Display label for how recent the condition is, as shown on the dashboard.
    pub fn relative_time(self) -> &'static str {
        match self {
            AlertCategory::Ph => "Just now",
            AlertCategory::GasProduction => "2 min ago",
            AlertCategory::Temperature => "5 min ago",
            AlertCategory::WasteLevel => "10 min ago",
            AlertCategory::Nominal => "Now",
        }
    }
}

/// A single classified observation derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub severity: Severity,
    pub category: AlertCategory,
    /// Short heading, e.g. `"Low pH Alert"`.
    pub title: String,
    /// Full human message: `"{title}: {detail}"` with the offending value embedded.
    pub message: String,
    pub relative_time: &'static str,
}

impl AlertRecord {
    pub(crate) fn new(
        severity: Severity,
        category: AlertCategory,
        title: &str,
        detail: impl std::fmt::Display,
    ) -> Self {
        Self {
            severity,
            category,
            title: title.to_string(),
            message: format!("{title}: {detail}"),
            relative_time: category.relative_time(),
        }
    }
}

/// A transient user-facing notification the client should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    /// How long the client keeps the toast on screen.
    pub duration_ms: u64,
}
