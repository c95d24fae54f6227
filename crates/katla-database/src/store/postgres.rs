//! PostgreSQL-backed hive section store.

use async_trait::async_trait;

use katla_core::error::AppError;
use katla_core::result::AppResult;
use katla_core::types::{HiveId, HiveSectionId};
use katla_entity::hive_section::{
    HiveSectionChanges, HiveSectionStatusChange, NewStoreHiveSection, StoreHiveSection,
};

use super::{HiveSectionStore, StoreHealth};
use crate::connection::DatabasePool;
use crate::repositories::{HiveRepository, HiveSectionRepository};

/// Hive section store over the `store_hive_sections` and `store_hives`
/// tables. Code uniqueness and the hive foreign key are enforced by table
/// constraints and surface as conflicts.
#[derive(Debug, Clone)]
pub struct PgHiveSectionStore {
    db: DatabasePool,
    sections: HiveSectionRepository,
    hives: HiveRepository,
}

impl PgHiveSectionStore {
    /// Creates a store sharing the given pool.
    pub fn new(db: DatabasePool) -> Self {
        let sections = HiveSectionRepository::new(db.pool().clone());
        let hives = HiveRepository::new(db.pool().clone());
        Self {
            db,
            sections,
            hives,
        }
    }
}

#[async_trait]
impl HiveSectionStore for PgHiveSectionStore {
    async fn list_sections(&self) -> AppResult<Vec<StoreHiveSection>> {
        self.sections.find_all().await
    }

    async fn list_sections_by_hive(&self, hive_id: HiveId) -> AppResult<Vec<StoreHiveSection>> {
        self.sections.find_by_hive(hive_id).await
    }

    async fn find_section(&self, id: HiveSectionId) -> AppResult<Option<StoreHiveSection>> {
        self.sections.find_by_id(id).await
    }

    async fn find_sections_by_code(
        &self,
        code: &str,
        excluding: Option<HiveSectionId>,
    ) -> AppResult<Vec<StoreHiveSection>> {
        self.sections.find_by_code(code, excluding).await
    }

    async fn hive_exists(&self, hive_id: HiveId) -> AppResult<bool> {
        self.hives.exists(hive_id).await
    }

    async fn insert_section(&self, section: NewStoreHiveSection) -> AppResult<StoreHiveSection> {
        self.sections.create(&section).await
    }

    async fn update_section(
        &self,
        id: HiveSectionId,
        changes: &HiveSectionChanges,
    ) -> AppResult<StoreHiveSection> {
        self.sections.update_fields(id, changes).await
    }

    async fn set_section_status(
        &self,
        id: HiveSectionId,
        change: &HiveSectionStatusChange,
    ) -> AppResult<StoreHiveSection> {
        self.sections.update_status(id, change).await
    }

    async fn purge_section(&self, id: HiveSectionId) -> AppResult<bool> {
        if self.sections.delete_soft_deleted(id).await? {
            return Ok(true);
        }
        // Nothing removed: either the row is gone or it is not soft-deleted.
        if self.sections.exists(id).await? {
            return Err(AppError::conflict(format!(
                "The hive section with id {id} hasn't got deleted status"
            )));
        }
        Ok(false)
    }

    async fn health_check(&self) -> AppResult<StoreHealth> {
        let reachable = self.db.health_check().await?;
        Ok(StoreHealth {
            backend: "postgres",
            reachable,
            pool: Some(self.db.stats()),
        })
    }
}
