use axum::routing::post;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Registration route mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(users::create_user))
}
