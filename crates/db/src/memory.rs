//! In-memory [`DocumentStore`] for tests and database-less local runs.
//!
//! All state sits behind one `RwLock`, so each uniqueness check happens
//! under the same write guard as the insert it protects.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use noteful_core::search::matches_search_term;
use noteful_core::types::{new_entity_id, EntityId};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::named::{Collection, NamedEntity};
use crate::models::note::{CreateNote, Note, NoteFilter, UpdateNote};
use crate::models::user::{CreateUser, User};
use crate::store::DocumentStore;

#[derive(Default)]
struct Tables {
    users: HashMap<EntityId, User>,
    folders: HashMap<EntityId, NamedEntity>,
    tags: HashMap<EntityId, NamedEntity>,
    notes: HashMap<EntityId, Note>,
}

impl Tables {
    fn named(&self, collection: Collection) -> &HashMap<EntityId, NamedEntity> {
        match collection {
            Collection::Folders => &self.folders,
            Collection::Tags => &self.tags,
        }
    }

    fn named_mut(&mut self, collection: Collection) -> &mut HashMap<EntityId, NamedEntity> {
        match collection {
            Collection::Folders => &mut self.folders,
            Collection::Tags => &mut self.tags,
        }
    }
}

/// Name of the unique constraint the SQL schema uses for `collection`.
fn name_constraint(collection: Collection) -> String {
    format!("uq_{}_name_user", collection.table())
}

/// Same ordering as the SQL `ORDER BY name COLLATE "C", id`.
fn sort_by_name(rows: &mut [NamedEntity]) {
    rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

/// A [`DocumentStore`] that keeps everything in process memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == input.username) {
            return Err(StoreError::UniqueViolation {
                constraint: "uq_users_username".into(),
            });
        }

        let now = Utc::now();
        let user = User {
            id: new_entity_id(),
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            fullname: input.fullname.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: EntityId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_named(
        &self,
        collection: Collection,
        user_id: EntityId,
    ) -> StoreResult<Vec<NamedEntity>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<_> = tables
            .named(collection)
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        sort_by_name(&mut rows);
        Ok(rows)
    }

    async fn find_one_named(
        &self,
        collection: Collection,
        user_id: EntityId,
        id: EntityId,
    ) -> StoreResult<Option<NamedEntity>> {
        let tables = self.tables.read().await;
        Ok(tables
            .named(collection)
            .get(&id)
            .filter(|e| e.user_id == user_id)
            .cloned())
    }

    async fn find_named_by_ids(
        &self,
        collection: Collection,
        user_id: EntityId,
        ids: &[EntityId],
    ) -> StoreResult<Vec<NamedEntity>> {
        let tables = self.tables.read().await;
        let table = tables.named(collection);
        let mut rows: Vec<_> = table
            .values()
            .filter(|e| e.user_id == user_id && ids.contains(&e.id))
            .cloned()
            .collect();
        sort_by_name(&mut rows);
        Ok(rows)
    }

    async fn count_owned(
        &self,
        collection: Collection,
        user_id: EntityId,
        ids: &[EntityId],
    ) -> StoreResult<u64> {
        let tables = self.tables.read().await;
        let table = tables.named(collection);
        let count = ids
            .iter()
            .filter(|id| table.get(id).is_some_and(|e| e.user_id == user_id))
            .count();
        Ok(count as u64)
    }

    async fn insert_named(
        &self,
        collection: Collection,
        user_id: EntityId,
        name: &str,
    ) -> StoreResult<NamedEntity> {
        let mut tables = self.tables.write().await;
        let table = tables.named_mut(collection);
        if table
            .values()
            .any(|e| e.user_id == user_id && e.name == name)
        {
            return Err(StoreError::UniqueViolation {
                constraint: name_constraint(collection),
            });
        }

        let now = Utc::now();
        let entity = NamedEntity {
            id: new_entity_id(),
            name: name.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
        };
        table.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn update_named(
        &self,
        collection: Collection,
        user_id: EntityId,
        id: EntityId,
        name: &str,
    ) -> StoreResult<Option<NamedEntity>> {
        let mut tables = self.tables.write().await;
        let table = tables.named_mut(collection);

        if !table.get(&id).is_some_and(|e| e.user_id == user_id) {
            return Ok(None);
        }
        if table
            .values()
            .any(|e| e.id != id && e.user_id == user_id && e.name == name)
        {
            return Err(StoreError::UniqueViolation {
                constraint: name_constraint(collection),
            });
        }

        Ok(table.get_mut(&id).map(|entity| {
            entity.name = name.to_string();
            entity.updated_at = Utc::now();
            entity.clone()
        }))
    }

    async fn delete_named(
        &self,
        collection: Collection,
        user_id: EntityId,
        id: EntityId,
    ) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let table = tables.named_mut(collection);
        if table.get(&id).is_some_and(|e| e.user_id == user_id) {
            table.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn find_notes(&self, user_id: EntityId, filter: &NoteFilter) -> StoreResult<Vec<Note>> {
        let tables = self.tables.read().await;
        let mut notes: Vec<_> = tables
            .notes
            .values()
            .filter(|n| n.user_id == user_id)
            .filter(|n| {
                filter.search_term.as_deref().map_or(true, |term| {
                    matches_search_term(term, &n.title, n.content.as_deref())
                })
            })
            .filter(|n| filter.folder_id.map_or(true, |f| n.folder_id == Some(f)))
            .filter(|n| filter.tag_id.map_or(true, |t| n.tags.contains(&t)))
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(notes)
    }

    async fn find_one_note(&self, user_id: EntityId, id: EntityId) -> StoreResult<Option<Note>> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .get(&id)
            .filter(|n| n.user_id == user_id)
            .cloned())
    }

    async fn insert_note(&self, input: &CreateNote) -> StoreResult<Note> {
        let now = Utc::now();
        let note = Note {
            id: new_entity_id(),
            title: input.title.clone(),
            content: input.content.clone(),
            folder_id: input.folder_id,
            tags: input.tags.clone(),
            user_id: input.user_id,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .notes
            .insert(note.id, note.clone());
        Ok(note)
    }

    async fn update_note(
        &self,
        user_id: EntityId,
        id: EntityId,
        input: &UpdateNote,
    ) -> StoreResult<Option<Note>> {
        let mut tables = self.tables.write().await;
        let Some(note) = tables.notes.get_mut(&id).filter(|n| n.user_id == user_id) else {
            return Ok(None);
        };

        if let Some(title) = &input.title {
            note.title = title.clone();
        }
        if let Some(content) = &input.content {
            note.content = content.clone();
        }
        if let Some(folder_id) = input.folder_id {
            note.folder_id = folder_id;
        }
        if let Some(tags) = &input.tags {
            note.tags = tags.clone();
        }
        note.updated_at = Utc::now();

        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, user_id: EntityId, id: EntityId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.notes.get(&id).is_some_and(|n| n.user_id == user_id) {
            tables.notes.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn pull_tag_from_notes(&self, tag_id: EntityId) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let mut touched = 0;
        for note in tables.notes.values_mut() {
            let before = note.tags.len();
            note.tags.retain(|t| *t != tag_id);
            if note.tags.len() != before {
                touched += 1;
            }
        }
        Ok(touched)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
