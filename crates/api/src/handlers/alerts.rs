//! Handler for digester snapshot evaluation.

use axum::Json;
use biogas_core::alert::{AlertRecord, Notification};
use biogas_core::metrics::MetricSnapshot;
use biogas_core::monitoring;
use serde::Serialize;

/// Alerts, quick analysis and pending toasts for one snapshot.
#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub alerts: Vec<AlertRecord>,
    pub summary: String,
    /// One entry per critical alert, for the client to display transiently.
    pub notifications: Vec<Notification>,
}

/// POST /api/alerts/evaluate
///
/// Classify a metric snapshot against the digester thresholds.
pub async fn evaluate(Json(snapshot): Json<MetricSnapshot>) -> Json<EvaluationResponse> {
    let alerts = monitoring::evaluate(&snapshot);
    let summary = monitoring::summarize(&snapshot);
    let notifications = monitoring::notifications(&alerts);

    for note in &notifications {
        tracing::warn!(
            alert = %note.message,
            recorded_at = %snapshot.timestamp,
            "Critical digester alert"
        );
    }
    tracing::debug!(alert_count = alerts.len(), "Snapshot evaluated");

    Json(EvaluationResponse {
        alerts,
        summary,
        notifications,
    })
}
