/// Domain-level errors shared by the services and the HTTP boundary.
///
/// Every variant maps to exactly one HTTP status in `noteful_api::error`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required field is missing, empty, or otherwise malformed.
    #[error("{0}")]
    Validation(String),

    /// A client-supplied id is not a well-formed identifier.
    #[error("Invalid id: {0}")]
    InvalidIdentifier(String),

    /// The `(name, user)` pair (or username) is already taken.
    #[error("The {entity} name already exists")]
    DuplicateName { entity: &'static str },

    /// A referenced entity in a request body does not exist or belongs to
    /// another user. Deliberately does not say which.
    #[error("The referenced {entity} is not valid")]
    InvalidReference { entity: &'static str },

    /// At least one tag id in a tag array is unknown or not owned.
    #[error("One or more tags are not valid")]
    TagOwnership,

    /// The addressed resource does not exist for the requesting user.
    /// Also used when it exists under another owner.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("{0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
