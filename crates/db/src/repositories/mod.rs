//! PostgreSQL repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every folder, tag and note
//! query is scoped by `user_id` except the tag cascade.

pub mod named_repo;
pub mod note_repo;
pub mod user_repo;

pub use named_repo::NamedRepo;
pub use note_repo::NoteRepo;
pub use user_repo::UserRepo;
