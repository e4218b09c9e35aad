pub mod alerts;
pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /register                                        create account (POST)
/// /login                                           authenticate (POST)
///
/// /alerts/evaluate                                 classify a snapshot (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/alerts", alerts::router())
}
