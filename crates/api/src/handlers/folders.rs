//! Handlers for the `/folders` resource.
//!
//! All endpoints require authentication and only ever see the caller's own
//! folders.

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

const COLLECTION: Collection = Collection::Folders;

/// GET /api/folders
///
/// List the caller's folders sorted by name.
pub async fn list_folders(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let folders = named::list(state.store.as_ref(), COLLECTION, auth.user_id).await?;
    Ok(Json(folders))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let folder = named::get(state.store.as_ref(), COLLECTION, auth.user_id, &id).await?;
    Ok(Json(folder))
}

/// POST /api/folders
pub async fn create_folder(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<NameInput>,
) -> AppResult<impl IntoResponse> {
    let folder =
        named::create(state.store.as_ref(), COLLECTION, auth.user_id, input.name.as_deref()).await?;
    Ok(Created::at("/api/folders", folder.id, folder))
}

/// PUT /api/folders/{id}
///
/// Rename a folder.
pub async fn update_folder(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<NameInput>,
) -> AppResult<impl IntoResponse> {
    let folder = named::update(
        state.store.as_ref(),
        COLLECTION,
        auth.user_id,
        &id,
        input.name.as_deref(),
    )
    .await?;
    Ok(Json(folder))
}

/// DELETE /api/folders/{id}
///
/// Notes filed under the folder keep their `folderId`.
pub async fn delete_folder(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    named::delete(state.store.as_ref(), COLLECTION, auth.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
