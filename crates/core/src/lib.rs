//! Noteful domain primitives: identifiers, errors, and store-independent
//! validation shared by the db and api crates.

pub mod error;
pub mod search;
pub mod types;
pub mod validation;
