//! Request extractors that run before handlers.
//!
//! - [`auth::AuthUser`] -- Resolves a Bearer token to the requesting user.

pub mod auth;
