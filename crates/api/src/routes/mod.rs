pub mod auth;
pub mod folders;
pub mod health;
pub mod notes;
pub mod tags;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth                  login (public)
/// /auth/refresh          refresh (bearer token)
///
/// /users                 register (public)
///
/// /folders               list, create
/// /folders/{id}          get, update, delete
///
/// /tags                  list, create
/// /tags/{id}             get, update, delete (cascades into notes)
///
/// /notes                 list (searchTerm, folderId, tagId), create
/// /notes/{id}            get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/folders", folders::router())
        .nest("/tags", tags::router())
        .nest("/notes", notes::router())
}
