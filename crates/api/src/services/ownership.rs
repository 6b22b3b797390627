//! Cross-collection reference checks.
//!
//! The store has no foreign keys, so every folder or tag id arriving in a
//! request body passes through here before it is written to a note.
//! Failures never say whether an id exists under another user.

use noteful_core::error::CoreError;
use noteful_core::types::{parse_entity_id, EntityId};
use noteful_db::models::named::{Collection, NamedEntity};
use noteful_db::store::DocumentStore;

use crate::error::AppResult;

/// Validate an optional folder reference from a request body.
///
/// `None` and `""` mean "no folder" and succeed without a lookup.
pub async fn validate_folder_ref(
    store: &dyn DocumentStore,
    user_id: EntityId,
    raw: Option<&str>,
) -> AppResult<Option<EntityId>> {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    let folder_id = parse_entity_id(raw)?;

    let owned = store
        .count_owned(Collection::Folders, user_id, &[folder_id])
        .await?;
    if owned != 1 {
        return Err(CoreError::InvalidReference {
            entity: Collection::Folders.label(),
        }
        .into());
    }
    Ok(Some(folder_id))
}

/// Validate a tag id array from a request body.
///
/// Ids are parsed in order and the first malformed one fails the whole
/// call. Duplicates are collapsed (first occurrence wins) before the owned
/// count is compared against the distinct count.
pub async fn validate_tag_refs(
    store: &dyn DocumentStore,
    user_id: EntityId,
    raw: &[String],
) -> AppResult<Vec<EntityId>> {
    let mut tag_ids: Vec<EntityId> = Vec::with_capacity(raw.len());
    for r in raw {
        let id = parse_entity_id(r)?;
        if !tag_ids.contains(&id) {
            tag_ids.push(id);
        }
    }
    if tag_ids.is_empty() {
        return Ok(tag_ids);
    }

    let owned = store.count_owned(Collection::Tags, user_id, &tag_ids).await?;
    if owned != tag_ids.len() as u64 {
        return Err(CoreError::TagOwnership.into());
    }
    Ok(tag_ids)
}

/// Fetch an entity addressed by path, or `NotFound` if it is missing or
/// owned by someone else.
pub async fn require_owned(
    store: &dyn DocumentStore,
    collection: Collection,
    user_id: EntityId,
    id: EntityId,
) -> AppResult<NamedEntity> {
    store
        .find_one_named(collection, user_id, id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: collection.label(),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use noteful_core::types::new_entity_id;
    use noteful_db::memory::MemoryStore;

    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn empty_folder_ref_is_no_reference() {
        let store = MemoryStore::new();
        let user = new_entity_id();
        assert_eq!(validate_folder_ref(&store, user, None).await.unwrap(), None);
        assert_eq!(validate_folder_ref(&store, user, Some("")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn malformed_folder_ref_is_invalid_identifier() {
        let store = MemoryStore::new();
        let err = validate_folder_ref(&store, new_entity_id(), Some("abc"))
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::InvalidIdentifier(_)));
    }

    #[tokio::test]
    async fn foreign_folder_is_invalid_reference() {
        let store = MemoryStore::new();
        let owner = new_entity_id();
        let folder = store
            .insert_named(Collection::Folders, owner, "Work")
            .await
            .unwrap();
        let raw = folder.id.to_string();

        let err = validate_folder_ref(&store, new_entity_id(), Some(&raw))
            .await
            .unwrap_err();
        assert_matches!(
            err,
            AppError::Core(CoreError::InvalidReference { entity: "Folder" })
        );
        assert_eq!(
            validate_folder_ref(&store, owner, Some(&raw)).await.unwrap(),
            Some(folder.id)
        );
    }

    #[tokio::test]
    async fn duplicate_tag_ids_are_collapsed() {
        let store = MemoryStore::new();
        let user = new_entity_id();
        let tag = store
            .insert_named(Collection::Tags, user, "a")
            .await
            .unwrap();
        let raw = vec![tag.id.to_string(), tag.id.to_string()];

        assert_eq!(
            validate_tag_refs(&store, user, &raw).await.unwrap(),
            vec![tag.id]
        );
    }

    #[tokio::test]
    async fn one_foreign_tag_fails_the_batch() {
        let store = MemoryStore::new();
        let user = new_entity_id();
        let mine = store
            .insert_named(Collection::Tags, user, "mine")
            .await
            .unwrap();
        let theirs = store
            .insert_named(Collection::Tags, new_entity_id(), "theirs")
            .await
            .unwrap();
        let raw = vec![mine.id.to_string(), theirs.id.to_string()];

        let err = validate_tag_refs(&store, user, &raw).await.unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::TagOwnership));
    }

    #[tokio::test]
    async fn first_malformed_tag_id_fails_before_lookup() {
        let store = MemoryStore::new();
        let raw = vec![new_entity_id().to_string(), "nope".to_string()];
        let err = validate_tag_refs(&store, new_entity_id(), &raw)
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::InvalidIdentifier(id)) if id == "nope");
    }

    #[tokio::test]
    async fn require_owned_hides_other_owners() {
        let store = MemoryStore::new();
        let folder = store
            .insert_named(Collection::Folders, new_entity_id(), "x")
            .await
            .unwrap();
        let err = require_owned(&store, Collection::Folders, new_entity_id(), folder.id)
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::NotFound { entity: "Folder" }));
    }
}
