//! Repository for the `folders` and `tags` tables.
//!
//! The table name is interpolated from [`Collection::table`], which only
//! yields fixed literals; all user input is bound.

use noteful_core::types::{new_entity_id, EntityId};
use sqlx::PgPool;

use crate::models::named::{Collection, NamedEntity};

/// Column list for `folders` / `tags` queries.
const COLUMNS: &str = "id, name, user_id, created_at, updated_at";

/// Provides owner-scoped CRUD for folders and tags.
pub struct NamedRepo;

impl NamedRepo {
    /// List a user's entities sorted by name (byte order, matching the
    /// in-memory store).
    pub async fn list(
        pool: &PgPool,
        collection: Collection,
        user_id: EntityId,
    ) -> Result<Vec<NamedEntity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE user_id = $1 ORDER BY name COLLATE \"C\" ASC, id ASC",
            collection.table()
        );
        sqlx::query_as::<_, NamedEntity>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find one entity by id, only if owned by `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        collection: Collection,
        user_id: EntityId,
        id: EntityId,
    ) -> Result<Option<NamedEntity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE id = $1 AND user_id = $2",
            collection.table()
        );
        sqlx::query_as::<_, NamedEntity>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every entity in `ids` that `user_id` owns. Unknown ids are
    /// silently absent from the result.
    pub async fn find_by_ids(
        pool: &PgPool,
        collection: Collection,
        user_id: EntityId,
        ids: &[EntityId],
    ) -> Result<Vec<NamedEntity>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE user_id = $1 AND id = ANY($2) ORDER BY name COLLATE \"C\" ASC",
            collection.table()
        );
        sqlx::query_as::<_, NamedEntity>(&query)
            .bind(user_id)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Count how many of `ids` exist and are owned by `user_id`.
    pub async fn count_owned(
        pool: &PgPool,
        collection: Collection,
        user_id: EntityId,
        ids: &[EntityId],
    ) -> Result<i64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let query = format!(
            "SELECT COUNT(*) FROM {} WHERE user_id = $1 AND id = ANY($2)",
            collection.table()
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(user_id)
            .bind(ids)
            .fetch_one(pool)
            .await
    }

    /// Insert a new entity.
    ///
    /// A duplicate `(name, user_id)` fails with the `uq_*_name_user` unique
    /// violation; callers rely on that instead of checking first.
    pub async fn create(
        pool: &PgPool,
        collection: Collection,
        user_id: EntityId,
        name: &str,
    ) -> Result<NamedEntity, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (id, name, user_id) VALUES ($1, $2, $3) RETURNING {COLUMNS}",
            collection.table()
        );
        sqlx::query_as::<_, NamedEntity>(&query)
            .bind(new_entity_id())
            .bind(name)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Rename an owned entity.
    ///
    /// Returns `None` if no row with the given id is owned by `user_id`.
    pub async fn rename(
        pool: &PgPool,
        collection: Collection,
        user_id: EntityId,
        id: EntityId,
        name: &str,
    ) -> Result<Option<NamedEntity>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET name = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}",
            collection.table()
        );
        sqlx::query_as::<_, NamedEntity>(&query)
            .bind(id)
            .bind(user_id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned entity. Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        collection: Collection,
        user_id: EntityId,
        id: EntityId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "DELETE FROM {} WHERE id = $1 AND user_id = $2",
            collection.table()
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
