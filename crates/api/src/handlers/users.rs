//! Handler for user registration.

use axum::extract::State;
use axum::response::IntoResponse;
use noteful_core::error::CoreError;
use noteful_core::validation::{validate_registration, NewUserInput};
use noteful_db::error::StoreError;
use noteful_db::models::user::{CreateUser, UserResponse};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::Created;
use crate::state::AppState;

/// POST /api/users
///
/// Register a new user. The response never includes the password hash.
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(input): AppJson<NewUserInput>,
) -> AppResult<impl IntoResponse> {
    let input = validate_registration(input)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        username: input.username,
        password_hash,
        fullname: input.fullname,
    };
    let user = match state.store.insert_user(&create).await {
        Err(StoreError::UniqueViolation { .. }) => {
            return Err(CoreError::DuplicateName { entity: "user" }.into());
        }
        other => other?,
    };

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");
    Ok(Created::at("/api/users", user.id, UserResponse::from(&user)))
}
