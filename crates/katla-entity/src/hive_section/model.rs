//! Request and result shapes exchanged with the hive section service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use katla_core::types::{HiveId, HiveSectionId};

/// Row of a hive section list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveSectionListItem {
    /// Section identifier.
    pub id: HiveSectionId,
    /// Display name.
    pub name: String,
    /// Section code.
    pub code: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
}

/// Full hive section as returned by lookups and mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveSection {
    /// Section identifier.
    pub id: HiveSectionId,
    /// Display name.
    pub name: String,
    /// Section code.
    pub code: String,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Owning hive.
    pub store_hive_id: HiveId,
    /// When the section was last modified.
    pub last_updated: DateTime<Utc>,
}

/// Caller-supplied fields for creating or updating a hive section.
///
/// Carries no identifier, audit columns, or status flag; those are owned
/// by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHiveSectionRequest {
    /// New display name.
    pub name: String,
    /// New section code. Must not be used by any other section.
    pub code: String,
    /// Hive the section belongs to. Must exist.
    pub store_hive_id: HiveId,
}
