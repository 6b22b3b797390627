//! Folder and tag operations.
//!
//! Both collections share one implementation selected by [`Collection`].
//! Duplicate names are detected from the store's unique-constraint error
//! after an optimistic write, never by reading first.

use noteful_core::error::CoreError;
use noteful_core::types::{parse_entity_id, EntityId};
use noteful_core::validation::require_name;
use noteful_db::error::{StoreError, StoreResult};
use noteful_db::models::named::{Collection, NamedEntity};
use noteful_db::store::DocumentStore;
use serde::Deserialize;

use super::ownership::require_owned;
use crate::error::AppResult;

/// Body of `POST` and `PUT` for folders and tags.
#[derive(Debug, Default, Deserialize)]
pub struct NameInput {
    pub name: Option<String>,
}

/// Turn a unique violation into `DuplicateName` for `collection`.
fn translate_duplicate<T>(collection: Collection, result: StoreResult<T>) -> AppResult<T> {
    match result {
        Err(StoreError::UniqueViolation { .. }) => Err(CoreError::DuplicateName {
            entity: collection.noun(),
        }
        .into()),
        other => Ok(other?),
    }
}

/// All of a user's entities, sorted by name.
pub async fn list(
    store: &dyn DocumentStore,
    collection: Collection,
    user_id: EntityId,
) -> AppResult<Vec<NamedEntity>> {
    Ok(store.find_named(collection, user_id).await?)
}

pub async fn get(
    store: &dyn DocumentStore,
    collection: Collection,
    user_id: EntityId,
    raw_id: &str,
) -> AppResult<NamedEntity> {
    let id = parse_entity_id(raw_id)?;
    require_owned(store, collection, user_id, id).await
}

pub async fn create(
    store: &dyn DocumentStore,
    collection: Collection,
    user_id: EntityId,
    name: Option<&str>,
) -> AppResult<NamedEntity> {
    let name = require_name(name)?;
    let entity =
        translate_duplicate(collection, store.insert_named(collection, user_id, &name).await)?;

    tracing::info!(
        collection = collection.table(),
        id = %entity.id,
        user_id = %user_id,
        "Entity created",
    );
    Ok(entity)
}

/// Rename an owned entity. A well-formed id the user does not own is
/// `NotFound`.
pub async fn update(
    store: &dyn DocumentStore,
    collection: Collection,
    user_id: EntityId,
    raw_id: &str,
    name: Option<&str>,
) -> AppResult<NamedEntity> {
    let id = parse_entity_id(raw_id)?;
    let name = require_name(name)?;

    let entity = translate_duplicate(
        collection,
        store.update_named(collection, user_id, id, &name).await,
    )?
    .ok_or(CoreError::NotFound {
        entity: collection.label(),
    })?;

    tracing::info!(
        collection = collection.table(),
        id = %entity.id,
        user_id = %user_id,
        "Entity renamed",
    );
    Ok(entity)
}

/// Delete an owned entity. Missing and foreign ids succeed silently.
///
/// Deleting a tag also pulls its id out of every note, for all users.
pub async fn delete(
    store: &dyn DocumentStore,
    collection: Collection,
    user_id: EntityId,
    raw_id: &str,
) -> AppResult<()> {
    let id = parse_entity_id(raw_id)?;

    if !store.delete_named(collection, user_id, id).await? {
        tracing::debug!(
            collection = collection.table(),
            id = %id,
            user_id = %user_id,
            "Delete matched nothing",
        );
        return Ok(());
    }

    if collection == Collection::Tags {
        let notes_touched = store.pull_tag_from_notes(id).await?;
        tracing::info!(tag_id = %id, user_id = %user_id, notes_touched, "Tag deleted");
    } else {
        tracing::info!(
            collection = collection.table(),
            id = %id,
            user_id = %user_id,
            "Entity deleted",
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use noteful_core::types::new_entity_id;
    use noteful_db::memory::MemoryStore;
    use noteful_db::models::note::CreateNote;

    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn create_trims_and_rejects_blank_names() {
        let store = MemoryStore::new();
        let user = new_entity_id();

        let folder = create(&store, Collection::Folders, user, Some("  Work  "))
            .await
            .unwrap();
        assert_eq!(folder.name, "Work");

        for blank in [None, Some(""), Some("   ")] {
            let err = create(&store, Collection::Folders, user, blank)
                .await
                .unwrap_err();
            assert_matches!(err, AppError::Core(CoreError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn second_create_with_same_name_is_duplicate() {
        let store = MemoryStore::new();
        let user = new_entity_id();
        create(&store, Collection::Tags, user, Some("X")).await.unwrap();

        let err = create(&store, Collection::Tags, user, Some("X"))
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::DuplicateName { entity: "tag" }));

        create(&store, Collection::Tags, new_entity_id(), Some("X"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_of_foreign_entity_is_not_found() {
        let store = MemoryStore::new();
        let folder = create(&store, Collection::Folders, new_entity_id(), Some("a"))
            .await
            .unwrap();

        let err = update(
            &store,
            Collection::Folders,
            new_entity_id(),
            &folder.id.to_string(),
            Some("b"),
        )
        .await
        .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::NotFound { entity: "Folder" }));
    }

    #[tokio::test]
    async fn rename_onto_sibling_is_duplicate() {
        let store = MemoryStore::new();
        let user = new_entity_id();
        let a = create(&store, Collection::Folders, user, Some("a")).await.unwrap();
        create(&store, Collection::Folders, user, Some("b")).await.unwrap();

        let err = update(&store, Collection::Folders, user, &a.id.to_string(), Some("b"))
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::DuplicateName { .. }));
    }

    #[tokio::test]
    async fn malformed_id_is_rejected_everywhere() {
        let store = MemoryStore::new();
        let user = new_entity_id();
        assert_matches!(
            get(&store, Collection::Tags, user, "123").await,
            Err(AppError::Core(CoreError::InvalidIdentifier(_)))
        );
        assert_matches!(
            delete(&store, Collection::Tags, user, "123").await,
            Err(AppError::Core(CoreError::InvalidIdentifier(_)))
        );
    }

    #[tokio::test]
    async fn deleting_unknown_id_is_silent() {
        let store = MemoryStore::new();
        delete(
            &store,
            Collection::Folders,
            new_entity_id(),
            &new_entity_id().to_string(),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn foreign_tag_delete_does_not_cascade() {
        let store = MemoryStore::new();
        let owner = new_entity_id();
        let tag = create(&store, Collection::Tags, owner, Some("t")).await.unwrap();
        let note = store
            .insert_note(&CreateNote {
                user_id: owner,
                title: "n".into(),
                content: None,
                folder_id: None,
                tags: vec![tag.id],
            })
            .await
            .unwrap();

        delete(&store, Collection::Tags, new_entity_id(), &tag.id.to_string())
            .await
            .unwrap();

        let note = store.find_one_note(owner, note.id).await.unwrap().unwrap();
        assert_eq!(note.tags, vec![tag.id]);
    }
}
