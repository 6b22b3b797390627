//! Handlers for the `/auth` resource (login, refresh).

use axum::extract::State;
use axum::Json;
use noteful_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub auth_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth
///
/// Exchange username + password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let username = required("username", input.username)?;
    let password = required("password", input.password)?;

    let user = state.auth.verify_credentials(&username, &password).await?;
    let auth_token = state.auth.issue_token(&user)?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(AuthResponse { auth_token }))
}

/// POST /api/auth/refresh
///
/// Exchange a still-valid bearer token for one with a fresh expiry.
pub async fn refresh(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<AuthResponse>> {
    let user = state
        .store
        .find_user_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unknown user".into())))?;
    let auth_token = state.auth.issue_token(&user)?;

    tracing::debug!(user_id = %user.id, "Token refreshed");
    Ok(Json(AuthResponse { auth_token }))
}

fn required(field: &str, value: Option<String>) -> Result<String, CoreError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoreError::Validation(format!("Missing `{field}` in request body")))
}
