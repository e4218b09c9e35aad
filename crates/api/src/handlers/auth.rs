//! Handlers for account registration and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use biogas_core::credentials::Identity;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for a created account.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: Identity,
}

/// Response for a successful login. No token is issued.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: Identity,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/register
///
/// Create an account. Returns 201 with the public identity fields.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = state.auth.register(&input.email, &input.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created",
            user,
        }),
    ))
}

/// POST /api/login
///
/// Authenticate with email + password. Any failure is a 401 with the same body.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state.auth.login(&input.email, &input.password).await?;
    Ok(Json(LoginResponse { user }))
}
