use crate::error::CoreError;

/// All entity primary keys are UUIDs (v7 on insert, so ids sort by creation time).
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Length of the canonical hyphenated id form (`8-4-4-4-12` hex digits).
pub const ENTITY_ID_LEN: usize = 36;

/// Parse a client-supplied identifier.
///
/// Only the fixed-length hyphenated form is accepted. Braced, URN and the
/// 32-char simple forms are rejected even though `uuid` itself would parse
/// them, so every id a client sees or sends has the same shape.
pub fn parse_entity_id(raw: &str) -> Result<EntityId, CoreError> {
    if raw.len() != ENTITY_ID_LEN {
        return Err(CoreError::InvalidIdentifier(raw.to_string()));
    }
    uuid::Uuid::try_parse(raw).map_err(|_| CoreError::InvalidIdentifier(raw.to_string()))
}

/// Generate a fresh id for a new row.
pub fn new_entity_id() -> EntityId {
    uuid::Uuid::now_v7()
}
