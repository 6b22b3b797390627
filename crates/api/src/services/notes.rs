//! Note operations.
//!
//! Every folder or tag id in a request body is checked through
//! [`ownership`](super::ownership) before the write. The checks are not
//! transactional with the write: a tag deleted in between leaves a dangling
//! id, which the resolved view skips.

use noteful_core::error::CoreError;
use noteful_core::search::normalize_search_term;
use noteful_core::types::{parse_entity_id, EntityId};
use noteful_core::validation::require_title;
use noteful_db::models::named::Collection;
use noteful_db::models::note::{CreateNote, Note, NoteFilter, NoteWithTags, UpdateNote};
use noteful_db::store::DocumentStore;
use serde::Deserialize;

use super::ownership::{validate_folder_ref, validate_tag_refs};
use crate::error::AppResult;
use crate::extract::present;

const NOTE: &str = "Note";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query string for `GET /api/notes`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteQuery {
    pub search_term: Option<String>,
    pub folder_id: Option<String>,
    pub tag_id: Option<String>,
}

/// Body of `POST /api/notes`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Body of `PUT /api/notes/{id}`.
///
/// Each field is absent (`None`), explicitly `null` (`Some(None)`), or set.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub content: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub folder_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub tags: Option<Option<Vec<String>>>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// A user's notes matching `query`, most recently updated first.
pub async fn list(
    store: &dyn DocumentStore,
    user_id: EntityId,
    query: &NoteQuery,
) -> AppResult<Vec<NoteWithTags>> {
    let filter = NoteFilter {
        search_term: normalize_search_term(query.search_term.as_deref()),
        folder_id: parse_filter_id(query.folder_id.as_deref())?,
        tag_id: parse_filter_id(query.tag_id.as_deref())?,
    };

    let notes = store.find_notes(user_id, &filter).await?;
    resolve_tags(store, user_id, notes).await
}

pub async fn get(
    store: &dyn DocumentStore,
    user_id: EntityId,
    raw_id: &str,
) -> AppResult<NoteWithTags> {
    let id = parse_entity_id(raw_id)?;
    let note = store
        .find_one_note(user_id, id)
        .await?
        .ok_or(CoreError::NotFound { entity: NOTE })?;
    resolve_one(store, user_id, note).await
}

/// Create a note. An empty `folderId` is stored as no folder.
pub async fn create(
    store: &dyn DocumentStore,
    user_id: EntityId,
    input: NewNote,
) -> AppResult<NoteWithTags> {
    let title = require_title(input.title.as_deref())?;
    let folder_id = validate_folder_ref(store, user_id, input.folder_id.as_deref()).await?;
    let tags = validate_tag_refs(store, user_id, input.tags.as_deref().unwrap_or_default()).await?;

    let note = store
        .insert_note(&CreateNote {
            user_id,
            title,
            content: input.content,
            folder_id,
            tags,
        })
        .await?;

    tracing::info!(note_id = %note.id, user_id = %user_id, "Note created");
    resolve_one(store, user_id, note).await
}

/// Apply a partial update. Only fields present in `patch` change.
///
/// The title is checked before anything else, so a blank title fails with a
/// validation error whatever else the patch contains.
pub async fn update(
    store: &dyn DocumentStore,
    user_id: EntityId,
    raw_id: &str,
    patch: NotePatch,
) -> AppResult<NoteWithTags> {
    let title = match patch.title {
        None => None,
        Some(title) => Some(require_title(title.as_deref())?),
    };
    let id = parse_entity_id(raw_id)?;

    let folder_id = match patch.folder_id {
        None => None,
        Some(raw) => Some(validate_folder_ref(store, user_id, raw.as_deref()).await?),
    };
    let tags = match patch.tags {
        None => None,
        Some(None) => {
            return Err(CoreError::Validation("`tags` must be an array".into()).into());
        }
        Some(Some(raw)) => Some(validate_tag_refs(store, user_id, &raw).await?),
    };

    let changes = UpdateNote {
        title,
        content: patch.content,
        folder_id,
        tags,
    };
    let note = store
        .update_note(user_id, id, &changes)
        .await?
        .ok_or(CoreError::NotFound { entity: NOTE })?;

    tracing::info!(note_id = %note.id, user_id = %user_id, "Note updated");
    resolve_one(store, user_id, note).await
}

/// Delete an owned note. Missing and foreign ids succeed silently.
pub async fn delete(store: &dyn DocumentStore, user_id: EntityId, raw_id: &str) -> AppResult<()> {
    let id = parse_entity_id(raw_id)?;
    if store.delete_note(user_id, id).await? {
        tracing::info!(note_id = %id, user_id = %user_id, "Note deleted");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Query-string ids: absent or empty means "no filter".
fn parse_filter_id(raw: Option<&str>) -> Result<Option<EntityId>, CoreError> {
    raw.filter(|r| !r.is_empty()).map(parse_entity_id).transpose()
}

/// Resolve every note's tag ids with one owner-scoped lookup.
async fn resolve_tags(
    store: &dyn DocumentStore,
    user_id: EntityId,
    notes: Vec<Note>,
) -> AppResult<Vec<NoteWithTags>> {
    let mut tag_ids: Vec<EntityId> = Vec::new();
    for id in notes.iter().flat_map(|n| n.tags.iter()) {
        if !tag_ids.contains(id) {
            tag_ids.push(*id);
        }
    }

    let tags = store
        .find_named_by_ids(Collection::Tags, user_id, &tag_ids)
        .await?;
    Ok(notes
        .into_iter()
        .map(|note| NoteWithTags::resolve(note, &tags))
        .collect())
}

async fn resolve_one(
    store: &dyn DocumentStore,
    user_id: EntityId,
    note: Note,
) -> AppResult<NoteWithTags> {
    let tags = store
        .find_named_by_ids(Collection::Tags, user_id, &note.tags)
        .await?;
    Ok(NoteWithTags::resolve(note, &tags))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use noteful_core::types::new_entity_id;
    use noteful_db::memory::MemoryStore;

    use super::*;
    use crate::error::AppError;

    fn titled(title: &str) -> NewNote {
        NewNote {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn title_only_note_has_no_folder_and_no_tags() {
        let store = MemoryStore::new();
        let user = new_entity_id();
        let note = create(&store, user, titled("T")).await.unwrap();
        let fetched = get(&store, user, &note.id.to_string()).await.unwrap();
        assert_eq!(fetched.folder_id, None);
        assert!(fetched.tags.is_empty());
    }

    #[tokio::test]
    async fn empty_folder_id_on_create_is_no_folder() {
        let store = MemoryStore::new();
        let input = NewNote {
            folder_id: Some(String::new()),
            ..titled("T")
        };
        let note = create(&store, new_entity_id(), input).await.unwrap();
        assert_eq!(note.folder_id, None);
    }

    #[tokio::test]
    async fn blank_title_beats_every_other_error() {
        let store = MemoryStore::new();
        let patch = NotePatch {
            title: Some(Some(String::new())),
            folder_id: Some(Some("bad-id".into())),
            tags: Some(None),
            ..Default::default()
        };
        let err = update(&store, new_entity_id(), "also-bad", patch)
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn null_title_is_a_validation_error() {
        let store = MemoryStore::new();
        let user = new_entity_id();
        let note = create(&store, user, titled("T")).await.unwrap();
        let patch = NotePatch {
            title: Some(None),
            ..Default::default()
        };
        assert_matches!(
            update(&store, user, &note.id.to_string(), patch).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    #[tokio::test]
    async fn null_tags_is_a_validation_error() {
        let store = MemoryStore::new();
        let user = new_entity_id();
        let note = create(&store, user, titled("T")).await.unwrap();
        let patch = NotePatch {
            tags: Some(None),
            ..Default::default()
        };
        assert_matches!(
            update(&store, user, &note.id.to_string(), patch).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }

    #[tokio::test]
    async fn empty_folder_id_detaches() {
        let store = MemoryStore::new();
        let user = new_entity_id();
        let folder = store
            .insert_named(Collection::Folders, user, "F")
            .await
            .unwrap();
        let input = NewNote {
            folder_id: Some(folder.id.to_string()),
            ..titled("T")
        };
        let note = create(&store, user, input).await.unwrap();
        assert_eq!(note.folder_id, Some(folder.id));

        let patch = NotePatch {
            folder_id: Some(Some(String::new())),
            ..Default::default()
        };
        let updated = update(&store, user, &note.id.to_string(), patch)
            .await
            .unwrap();
        assert_eq!(updated.folder_id, None);
        assert_eq!(updated.title, "T");
    }

    #[tokio::test]
    async fn update_of_foreign_note_is_not_found() {
        let store = MemoryStore::new();
        let note = create(&store, new_entity_id(), titled("T")).await.unwrap();
        let patch = NotePatch {
            content: Some(Some("x".into())),
            ..Default::default()
        };
        assert_matches!(
            update(&store, new_entity_id(), &note.id.to_string(), patch).await,
            Err(AppError::Core(CoreError::NotFound { entity: "Note" }))
        );
    }

    #[tokio::test]
    async fn malformed_filter_id_is_rejected() {
        let store = MemoryStore::new();
        let query = NoteQuery {
            folder_id: Some("zzz".into()),
            ..Default::default()
        };
        assert_matches!(
            list(&store, new_entity_id(), &query).await,
            Err(AppError::Core(CoreError::InvalidIdentifier(_)))
        );
    }

    #[tokio::test]
    async fn list_resolves_tags_in_note_order() {
        let store = MemoryStore::new();
        let user = new_entity_id();
        let a = store.insert_named(Collection::Tags, user, "a").await.unwrap();
        let b = store.insert_named(Collection::Tags, user, "b").await.unwrap();
        let input = NewNote {
            tags: Some(vec![b.id.to_string(), a.id.to_string()]),
            ..titled("T")
        };
        create(&store, user, input).await.unwrap();

        let notes = list(&store, user, &NoteQuery::default()).await.unwrap();
        let names: Vec<_> = notes[0].tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
