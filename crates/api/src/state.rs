use crate::auth::AuthService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the auth service holds its store behind an `Arc`).
/// Server configuration is consumed at startup and not kept here.
#[derive(Clone)]
pub struct AppState {
    /// Registration and login over the configured credential store.
    pub auth: AuthService,
}
