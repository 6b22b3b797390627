//! The document-store seam and its PostgreSQL implementation.

use async_trait::async_trait;
use noteful_core::types::EntityId;

use crate::error::StoreResult;
use crate::models::named::{Collection, NamedEntity};
use crate::models::note::{CreateNote, Note, NoteFilter, UpdateNote};
use crate::models::user::{CreateUser, User};
use crate::repositories::{NamedRepo, NoteRepo, UserRepo};
use crate::DbPool;

/// Everything the API needs from persistence.
///
/// Implementations must enforce username uniqueness and `(name, user_id)`
/// uniqueness for folders and tags atomically with the write, reporting a
/// conflict as [`StoreError::UniqueViolation`](crate::error::StoreError).
/// Folder, tag and note reads and writes are owner-scoped; a row owned by
/// someone else behaves exactly like a missing row.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    // --- Users ---

    async fn insert_user(&self, input: &CreateUser) -> StoreResult<User>;

    async fn find_user_by_id(&self, id: EntityId) -> StoreResult<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    // --- Folders and tags ---

    /// All of a user's entities, sorted by name ascending.
    async fn find_named(
        &self,
        collection: Collection,
        user_id: EntityId,
    ) -> StoreResult<Vec<NamedEntity>>;

    async fn find_one_named(
        &self,
        collection: Collection,
        user_id: EntityId,
        id: EntityId,
    ) -> StoreResult<Option<NamedEntity>>;

    /// The subset of `ids` that exists and is owned by `user_id`.
    async fn find_named_by_ids(
        &self,
        collection: Collection,
        user_id: EntityId,
        ids: &[EntityId],
    ) -> StoreResult<Vec<NamedEntity>>;

    /// How many of `ids` exist and are owned by `user_id`. `ids` must be distinct.
    async fn count_owned(
        &self,
        collection: Collection,
        user_id: EntityId,
        ids: &[EntityId],
    ) -> StoreResult<u64>;

    async fn insert_named(
        &self,
        collection: Collection,
        user_id: EntityId,
        name: &str,
    ) -> StoreResult<NamedEntity>;

    async fn update_named(
        &self,
        collection: Collection,
        user_id: EntityId,
        id: EntityId,
        name: &str,
    ) -> StoreResult<Option<NamedEntity>>;

    async fn delete_named(
        &self,
        collection: Collection,
        user_id: EntityId,
        id: EntityId,
    ) -> StoreResult<bool>;

    // --- Notes ---

    /// A user's notes matching `filter`, most recently updated first.
    async fn find_notes(&self, user_id: EntityId, filter: &NoteFilter) -> StoreResult<Vec<Note>>;

    async fn find_one_note(&self, user_id: EntityId, id: EntityId) -> StoreResult<Option<Note>>;

    async fn insert_note(&self, input: &CreateNote) -> StoreResult<Note>;

    async fn update_note(
        &self,
        user_id: EntityId,
        id: EntityId,
        input: &UpdateNote,
    ) -> StoreResult<Option<Note>>;

    async fn delete_note(&self, user_id: EntityId, id: EntityId) -> StoreResult<bool>;

    /// Remove `tag_id` from every note's tag set regardless of owner.
    /// Returns the number of notes changed.
    async fn pull_tag_from_notes(&self, tag_id: EntityId) -> StoreResult<u64>;

    // --- Health ---

    async fn ping(&self) -> StoreResult<()>;
}

/// [`DocumentStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert_user(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user_by_id(&self, id: EntityId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn find_named(
        &self,
        collection: Collection,
        user_id: EntityId,
    ) -> StoreResult<Vec<NamedEntity>> {
        Ok(NamedRepo::list(&self.pool, collection, user_id).await?)
    }

    async fn find_one_named(
        &self,
        collection: Collection,
        user_id: EntityId,
        id: EntityId,
    ) -> StoreResult<Option<NamedEntity>> {
        Ok(NamedRepo::find_by_id(&self.pool, collection, user_id, id).await?)
    }

    async fn find_named_by_ids(
        &self,
        collection: Collection,
        user_id: EntityId,
        ids: &[EntityId],
    ) -> StoreResult<Vec<NamedEntity>> {
        Ok(NamedRepo::find_by_ids(&self.pool, collection, user_id, ids).await?)
    }

    async fn count_owned(
        &self,
        collection: Collection,
        user_id: EntityId,
        ids: &[EntityId],
    ) -> StoreResult<u64> {
        let count = NamedRepo::count_owned(&self.pool, collection, user_id, ids).await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn insert_named(
        &self,
        collection: Collection,
        user_id: EntityId,
        name: &str,
    ) -> StoreResult<NamedEntity> {
        Ok(NamedRepo::create(&self.pool, collection, user_id, name).await?)
    }

    async fn update_named(
        &self,
        collection: Collection,
        user_id: EntityId,
        id: EntityId,
        name: &str,
    ) -> StoreResult<Option<NamedEntity>> {
        Ok(NamedRepo::rename(&self.pool, collection, user_id, id, name).await?)
    }

    async fn delete_named(
        &self,
        collection: Collection,
        user_id: EntityId,
        id: EntityId,
    ) -> StoreResult<bool> {
        Ok(NamedRepo::delete(&self.pool, collection, user_id, id).await?)
    }

    async fn find_notes(&self, user_id: EntityId, filter: &NoteFilter) -> StoreResult<Vec<Note>> {
        Ok(NoteRepo::list(&self.pool, user_id, filter).await?)
    }

    async fn find_one_note(&self, user_id: EntityId, id: EntityId) -> StoreResult<Option<Note>> {
        Ok(NoteRepo::find_by_id(&self.pool, user_id, id).await?)
    }

    async fn insert_note(&self, input: &CreateNote) -> StoreResult<Note> {
        Ok(NoteRepo::create(&self.pool, input).await?)
    }

    async fn update_note(
        &self,
        user_id: EntityId,
        id: EntityId,
        input: &UpdateNote,
    ) -> StoreResult<Option<Note>> {
        Ok(NoteRepo::update(&self.pool, user_id, id, input).await?)
    }

    async fn delete_note(&self, user_id: EntityId, id: EntityId) -> StoreResult<bool> {
        Ok(NoteRepo::delete(&self.pool, user_id, id).await?)
    }

    async fn pull_tag_from_notes(&self, tag_id: EntityId) -> StoreResult<u64> {
        let touched = NoteRepo::pull_tag(&self.pool, tag_id).await?;
        tracing::debug!(tag_id = %tag_id, touched, "Pulled tag from notes");
        Ok(touched)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
