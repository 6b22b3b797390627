//! Business rules between the handlers and the [`DocumentStore`].
//!
//! Services take `&dyn DocumentStore` plus the requesting user's id, parse
//! raw ids, validate input, and translate store conflicts into domain
//! errors. Handlers only do extraction and response shaping.
//!
//! [`DocumentStore`]: noteful_db::store::DocumentStore

pub mod named;
pub mod notes;
pub mod ownership;
