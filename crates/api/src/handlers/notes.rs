//! Handlers for the `/notes` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::Created;
use crate::services::notes::{self, NewNote, NotePatch, NoteQuery};
use crate::state::AppState;

/// GET /api/notes?searchTerm=&folderId=&tagId=
///
/// List the caller's notes, newest edit first. Filters combine with AND;
/// `searchTerm` matches title or content case-insensitively.
pub async fn list_notes(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<NoteQuery>,
) -> AppResult<impl IntoResponse> {
    let notes = notes::list(state.store.as_ref(), auth.user_id, &query).await?;
    Ok(Json(notes))
}

/// GET /api/notes/{id}
///
/// A single note with its tags resolved.
pub async fn get_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let note = notes::get(state.store.as_ref(), auth.user_id, &id).await?;
    Ok(Json(note))
}

/// POST /api/notes
pub async fn create_note(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<NewNote>,
) -> AppResult<impl IntoResponse> {
    let note = notes::create(state.store.as_ref(), auth.user_id, input).await?;
    Ok(Created::at("/api/notes", note.id, note))
}

/// PUT /api/notes/{id}
///
/// Partial update: fields missing from the body are left alone.
pub async fn update_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<NotePatch>,
) -> AppResult<impl IntoResponse> {
    let note = notes::update(state.store.as_ref(), auth.user_id, &id, patch).await?;
    Ok(Json(note))
}

/// DELETE /api/notes/{id}
pub async fn delete_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    notes::delete(state.store.as_ref(), auth.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
