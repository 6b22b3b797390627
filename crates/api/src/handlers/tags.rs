//! Handlers for the `/tags` resource.
//!
//! All endpoints require authentication and only ever see the caller's own
//! tags.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use noteful_db::models::named::Collection;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::Created;
use crate::services::named::{self, NameInput};
use crate::state::AppState;

const COLLECTION: Collection = Collection::Tags;

/// GET /api/tags
///
/// List the caller's tags sorted by name.
pub async fn list_tags(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let tags = named::list(state.store.as_ref(), COLLECTION, auth.user_id).await?;
    Ok(Json(tags))
}

/// GET /api/tags/{id}
pub async fn get_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let tag = named::get(state.store.as_ref(), COLLECTION, auth.user_id, &id).await?;
    Ok(Json(tag))
}

/// POST /api/tags
pub async fn create_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<NameInput>,
) -> AppResult<impl IntoResponse> {
    let tag =
        named::create(state.store.as_ref(), COLLECTION, auth.user_id, input.name.as_deref()).await?;
    Ok(Created::at("/api/tags", tag.id, tag))
}

/// PUT /api/tags/{id}
///
/// Rename a tag.
pub async fn update_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<NameInput>,
) -> AppResult<impl IntoResponse> {
    let tag = named::update(
        state.store.as_ref(),
        COLLECTION,
        auth.user_id,
        &id,
        input.name.as_deref(),
    )
    .await?;
    Ok(Json(tag))
}

/// DELETE /api/tags/{id}
///
/// Also removes the tag from every note that carries it.
pub async fn delete_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    named::delete(state.store.as_ref(), COLLECTION, auth.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
