//! Note entity model, DTOs, and the tag-resolved view.

use noteful_core::types::{EntityId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::named::Tag;

/// A row from the `notes` table. `tags` holds tag ids, not tag rows.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Note {
    pub id: EntityId,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<EntityId>,
    pub tags: Vec<EntityId>,
    pub user_id: EntityId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A note with its tag ids resolved to full tag entities.
///
/// `folderId` and `content` are omitted from the JSON when unset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteWithTags {
    pub id: EntityId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<EntityId>,
    pub tags: Vec<Tag>,
    pub user_id: EntityId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl NoteWithTags {
    /// Attach resolved tags, keeping the note's own tag order. Ids without a
    /// matching entry in `resolved` (dangling references) are skipped.
    pub fn resolve(note: Note, resolved: &[Tag]) -> Self {
        let tags = note
            .tags
            .iter()
            .filter_map(|id| resolved.iter().find(|t| t.id == *id).cloned())
            .collect();

        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            folder_id: note.folder_id,
            tags,
            user_id: note.user_id,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

/// DTO for inserting a note. References are already validated.
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub user_id: EntityId,
    pub title: String,
    pub content: Option<String>,
    pub folder_id: Option<EntityId>,
    pub tags: Vec<EntityId>,
}

/// DTO for a partial note update.
///
/// The outer `Option` says whether the field was supplied at all; for
/// `content` and `folder_id` an inner `None` clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateNote {
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub folder_id: Option<Option<EntityId>>,
    pub tags: Option<Vec<EntityId>>,
}

/// Owner-scoped list filters, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    /// Case-insensitive substring matched against title OR content.
    pub search_term: Option<String>,
    pub folder_id: Option<EntityId>,
    pub tag_id: Option<EntityId>,
}
