//! Persisted hive section row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use katla_core::types::{HiveId, HiveSectionId, UserId};

/// A hive section as stored in `store_hive_sections`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StoreHiveSection {
    /// Store-assigned identifier. Never changes after insert.
    pub id: HiveSectionId,
    /// Section code, unique across every row including soft-deleted ones.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Owning hive.
    pub store_hive_id: HiveId,
    /// Soft-delete flag. A row may only be purged while this is set.
    pub is_deleted: bool,
    /// User that created the row.
    pub created_by: UserId,
    /// User that last modified the row.
    pub last_updated_by: UserId,
    /// When the row was last modified.
    pub last_updated: DateTime<Utc>,
}

/// Data required to insert a hive section. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStoreHiveSection {
    /// Section code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Owning hive.
    pub store_hive_id: HiveId,
    /// Initial soft-delete flag.
    pub is_deleted: bool,
    /// Creating user.
    pub created_by: UserId,
    /// Last modifying user (the creator on insert).
    pub last_updated_by: UserId,
    /// Insert timestamp.
    pub last_updated: DateTime<Utc>,
}

impl NewStoreHiveSection {
    /// Materialize the row once the store has assigned an id.
    pub fn with_id(self, id: HiveSectionId) -> StoreHiveSection {
        StoreHiveSection {
            id,
            code: self.code,
            name: self.name,
            store_hive_id: self.store_hive_id,
            is_deleted: self.is_deleted,
            created_by: self.created_by,
            last_updated_by: self.last_updated_by,
            last_updated: self.last_updated,
        }
    }
}

/// Columns written when a section's fields are edited.
///
/// The soft-delete flag and `created_by` are absent, so an edit never
/// overwrites a concurrent status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiveSectionChanges {
    /// New section code.
    pub code: String,
    /// New display name.
    pub name: String,
    /// New owning hive.
    pub store_hive_id: HiveId,
    /// Modifying user.
    pub last_updated_by: UserId,
    /// Modification timestamp.
    pub last_updated: DateTime<Utc>,
}

/// Columns written when a section's soft-delete flag is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiveSectionStatusChange {
    /// New soft-delete flag.
    pub is_deleted: bool,
    /// Modifying user.
    pub last_updated_by: UserId,
    /// Modification timestamp.
    pub last_updated: DateTime<Utc>,
}
