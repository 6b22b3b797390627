//! Request-field validation that does not need the store.
//!
//! Names and titles are trimmed before the emptiness check and the trimmed
//! value is what gets persisted.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Require a non-blank `name` field (folders and tags).
pub fn require_name(name: Option<&str>) -> Result<String, CoreError> {
    require_non_blank("name", name)
}

/// Require a non-blank `title` field (notes).
pub fn require_title(title: Option<&str>) -> Result<String, CoreError> {
    require_non_blank("title", title)
}

fn require_non_blank(field: &str, value: Option<&str>) -> Result<String, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(CoreError::Validation(format!(
            "Missing `{field}` in request body"
        ))),
    }
}

/// Registration payload as it arrives from the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUserInput {
    pub fullname: Option<String>,
    #[validate(
        required(message = "Missing `username` in request body"),
        length(min = 1, message = "`username` must be at least 1 character long")
    )]
    pub username: Option<String>,
    #[validate(
        required(message = "Missing `password` in request body"),
        length(
            min = 8,
            max = 72,
            message = "`password` must be between 8 and 72 characters long"
        )
    )]
    pub password: Option<String>,
}

/// A registration payload that passed [`validate_registration`].
#[derive(Debug, Clone)]
pub struct ValidatedUser {
    pub username: String,
    pub password: String,
    pub fullname: Option<String>,
}

/// Validate a registration payload.
///
/// `username` and `password` are taken verbatim and must not carry leading
/// or trailing whitespace. `fullname` is trimmed and dropped when blank.
pub fn validate_registration(input: NewUserInput) -> Result<ValidatedUser, CoreError> {
    for (field, value) in [("username", &input.username), ("password", &input.password)] {
        if let Some(v) = value {
            if v.trim() != v {
                return Err(CoreError::Validation(format!(
                    "`{field}` cannot start or end with whitespace"
                )));
            }
        }
    }

    input.validate().map_err(first_message)?;

    let fullname = input
        .fullname
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());

    match (input.username, input.password) {
        (Some(username), Some(password)) => Ok(ValidatedUser {
            username,
            password,
            fullname,
        }),
        // `validate()` already rejects missing fields.
        _ => Err(CoreError::Validation("Missing credentials".into())),
    }
}

/// Collapse `validator` output into a single client-facing message.
fn first_message(errors: ValidationErrors) -> CoreError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request body".to_string());

    CoreError::Validation(message)
}
