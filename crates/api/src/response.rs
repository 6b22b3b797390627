//! Shared response helpers for API handlers.
//!
//! Bodies are the bare entity or array; there is no envelope.

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// `201 Created` with a `Location` header pointing at the new resource.
pub struct Created<T> {
    pub location: String,
    pub body: T,
}

impl<T: Serialize> Created<T> {
    /// Location is `{base}/{id}`, e.g. `/api/folders/<id>`.
    pub fn at(base: &str, id: impl std::fmt::Display, body: T) -> Self {
        Self {
            location: format!("{base}/{id}"),
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (
            StatusCode::CREATED,
            [(LOCATION, self.location)],
            Json(self.body),
        )
            .into_response()
    }
}
