//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use katla_core::types::HiveId;
use katla_entity::hive_section::UpdateHiveSectionRequest;

/// Body of `POST /api/sections` and `PUT /api/sections/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HiveSectionBody {
    /// Section name.
    #[validate(length(min = 1, max = 60, message = "Name must be 1-60 characters"))]
    pub name: String,
    /// Section code.
    #[validate(length(min = 1, max = 5, message = "Code must be 1-5 characters"))]
    pub code: String,
    /// Owning hive.
    #[validate(range(min = 1, message = "storeHiveId must be positive"))]
    pub store_hive_id: i32,
}

impl From<HiveSectionBody> for UpdateHiveSectionRequest {
    fn from(body: HiveSectionBody) -> Self {
        Self {
            name: body.name,
            code: body.code,
            store_hive_id: HiveId(body.store_hive_id),
        }
    }
}
