//! Folders and tags.
//!
//! Both collections have the same shape (`name` unique per owner), so they
//! share one row type and are told apart by [`Collection`].

use noteful_core::types::{EntityId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Which owner-scoped, uniquely-named collection an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Folders,
    Tags,
}

impl Collection {
    /// Backing table name. Only ever one of two literals.
    pub fn table(self) -> &'static str {
        match self {
            Collection::Folders => "folders",
            Collection::Tags => "tags",
        }
    }

    /// Singular lowercase noun for messages ("The folder name already exists").
    pub fn noun(self) -> &'static str {
        match self {
            Collection::Folders => "folder",
            Collection::Tags => "tag",
        }
    }

    /// Capitalized entity label for `NotFound` errors and log fields.
    pub fn label(self) -> &'static str {
        match self {
            Collection::Folders => "Folder",
            Collection::Tags => "Tag",
        }
    }

    /// URL path segment under `/api`.
    pub fn path(self) -> &'static str {
        self.table()
    }
}

/// A row from the `folders` or `tags` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedEntity {
    pub id: EntityId,
    pub name: String,
    pub user_id: EntityId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub type Folder = NamedEntity;
pub type Tag = NamedEntity;
