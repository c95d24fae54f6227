//! Field copies between hive section records and service shapes.
//!
//! Every assignment is spelled out so that a request can never reach the
//! identifier, audit, or status columns.

use chrono::{DateTime, Utc};

use katla_core::types::UserId;
use katla_entity::hive_section::{
    HiveSection, HiveSectionChanges, HiveSectionListItem, NewStoreHiveSection,
    StoreHiveSection, UpdateHiveSectionRequest,
};

/// Projects a record into a list row.
pub fn to_list_item(record: &StoreHiveSection) -> HiveSectionListItem {
    HiveSectionListItem {
        id: record.id,
        name: record.name.clone(),
        code: record.code.clone(),
        is_deleted: record.is_deleted,
    }
}

/// Projects a record into the full result shape.
pub fn to_hive_section(record: &StoreHiveSection) -> HiveSection {
    HiveSection {
        id: record.id,
        name: record.name.clone(),
        code: record.code.clone(),
        is_deleted: record.is_deleted,
        store_hive_id: record.store_hive_id,
        last_updated: record.last_updated,
    }
}

/// Builds an insertable, not-deleted record from a create request.
pub fn to_new_record(
    request: &UpdateHiveSectionRequest,
    actor: UserId,
    now: DateTime<Utc>,
) -> NewStoreHiveSection {
    NewStoreHiveSection {
        code: request.code.clone(),
        name: request.name.clone(),
        store_hive_id: request.store_hive_id,
        is_deleted: false,
        created_by: actor,
        last_updated_by: actor,
        last_updated: now,
    }
}

/// Builds the column changes for an edit of an existing section.
pub fn to_changes(
    request: &UpdateHiveSectionRequest,
    actor: UserId,
    now: DateTime<Utc>,
) -> HiveSectionChanges {
    HiveSectionChanges {
        code: request.code.clone(),
        name: request.name.clone(),
        store_hive_id: request.store_hive_id,
        last_updated_by: actor,
        last_updated: now,
    }
}
