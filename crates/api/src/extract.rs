//! Request-side helpers: a JSON extractor with the API's error body and a
//! serde helper for "absent vs null" fields.

use axum::extract::FromRequest;
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// `axum::Json` whose rejection (bad syntax, wrong types, missing
/// content type) renders as a 400 `VALIDATION_ERROR`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Deserialize a present field into `Some(value)`, where `value` may itself
/// be `None` for an explicit `null`.
///
/// Use together with `#[serde(default)]` so that an absent field stays
/// `None`, giving `Option<Option<T>>` its three states.
pub fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
