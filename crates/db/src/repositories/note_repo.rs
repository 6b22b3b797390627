//! Repository for the `notes` table.

use noteful_core::types::{new_entity_id, EntityId};
use sqlx::PgPool;

use crate::models::note::{CreateNote, Note, NoteFilter, UpdateNote};

/// Column list for `notes` queries.
const COLUMNS: &str = "id, title, content, folder_id, tags, user_id, created_at, updated_at";

/// Provides owner-scoped CRUD for notes plus the tag cascade.
pub struct NoteRepo;

impl NoteRepo {
    /// List a user's notes, most recently updated first.
    ///
    /// The search term is matched with `POSITION`, so `%`, `_` and regex
    /// metacharacters are literal.
    pub async fn list(
        pool: &PgPool,
        user_id: EntityId,
        filter: &NoteFilter,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes \
             WHERE user_id = $1 \
               AND ($2::TEXT IS NULL \
                    OR POSITION(LOWER($2::TEXT) IN LOWER(title)) > 0 \
                    OR POSITION(LOWER($2::TEXT) IN LOWER(COALESCE(content, ''))) > 0) \
               AND ($3::UUID IS NULL OR folder_id = $3::UUID) \
               AND ($4::UUID IS NULL OR $4::UUID = ANY(tags)) \
             ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(filter.search_term.as_deref())
            .bind(filter.folder_id)
            .bind(filter.tag_id)
            .fetch_all(pool)
            .await
    }

    /// Find a note by id, only if owned by `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: EntityId,
        id: EntityId,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new note, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNote) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (id, title, content, folder_id, tags, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(new_entity_id())
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.folder_id)
            .bind(&input.tags)
            .bind(input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Partially update an owned note.
    ///
    /// `title` and `tags` use `COALESCE`; `content` and `folder_id` carry a
    /// "provided" flag so that an explicit clear writes NULL. `updated_at`
    /// is always refreshed.
    ///
    /// Returns `None` if no note with the given id is owned by `user_id`.
    pub async fn update(
        pool: &PgPool,
        user_id: EntityId,
        id: EntityId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let content_provided = input.content.is_some();
        let content_value = input.content.as_ref().and_then(|c| c.as_deref());
        let folder_provided = input.folder_id.is_some();
        let folder_value = input.folder_id.flatten();

        let query = format!(
            "UPDATE notes SET \
                 title      = COALESCE($3::TEXT, title), \
                 content    = CASE WHEN $4::BOOLEAN THEN $5::TEXT ELSE content END, \
                 folder_id  = CASE WHEN $6::BOOLEAN THEN $7::UUID ELSE folder_id END, \
                 tags       = COALESCE($8::UUID[], tags), \
                 updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.title.as_deref())
            .bind(content_provided)
            .bind(content_value)
            .bind(folder_provided)
            .bind(folder_value)
            .bind(input.tags.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned note. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: EntityId, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove `tag_id` from every note's tag array, across all users.
    ///
    /// Returns the number of notes touched. `updated_at` is left alone:
    /// the note itself was not edited.
    pub async fn pull_tag(pool: &PgPool, tag_id: EntityId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notes SET tags = array_remove(tags, $1::UUID) WHERE $1::UUID = ANY(tags)",
        )
        .bind(tag_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
