//! The persistence boundary consumed by the hive section service.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use katla_core::result::AppResult;
use katla_core::types::{HiveId, HiveSectionId};
use katla_entity::hive_section::{
    HiveSectionChanges, HiveSectionStatusChange, NewStoreHiveSection, StoreHiveSection,
};

use crate::connection::PoolStats;

pub use memory::MemoryHiveSectionStore;
pub use postgres::PgHiveSectionStore;

/// Result of a store health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreHealth {
    /// Short backend name, `postgres` or `memory`.
    pub backend: &'static str,
    /// Whether the backend answered.
    pub reachable: bool,
    /// Connection pool usage, for pooled backends.
    pub pool: Option<PoolStats>,
}

/// Query and write access to hive sections and hive existence.
///
/// Listing methods return rows ordered by ascending ID. Writes that would
/// break code uniqueness or point at a missing hive fail with a conflict
/// even if the caller validated beforehand, so concurrent writers cannot
/// both win the same code. Field edits and status changes touch disjoint
/// columns, and a purge re-checks the soft-delete flag in the same step
/// that removes the row.
#[async_trait]
pub trait HiveSectionStore: Send + Sync + 'static {
    /// Every section, soft-deleted ones included.
    async fn list_sections(&self) -> AppResult<Vec<StoreHiveSection>>;

    /// Sections whose `store_hive_id` equals `hive_id`.
    async fn list_sections_by_hive(&self, hive_id: HiveId) -> AppResult<Vec<StoreHiveSection>>;

    /// A single section by ID.
    async fn find_section(&self, id: HiveSectionId) -> AppResult<Option<StoreHiveSection>>;

    /// Sections carrying `code`, skipping `excluding` when given.
    async fn find_sections_by_code(
        &self,
        code: &str,
        excluding: Option<HiveSectionId>,
    ) -> AppResult<Vec<StoreHiveSection>>;

    /// Whether a hive with this ID exists.
    async fn hive_exists(&self, hive_id: HiveId) -> AppResult<bool>;

    /// Insert a new section; the store assigns its ID.
    async fn insert_section(&self, section: NewStoreHiveSection) -> AppResult<StoreHiveSection>;

    /// Write code, name, hive and audit columns of an existing section.
    /// NotFound if the row is gone.
    async fn update_section(
        &self,
        id: HiveSectionId,
        changes: &HiveSectionChanges,
    ) -> AppResult<StoreHiveSection>;

    /// Write the soft-delete flag and audit columns of an existing section.
    /// NotFound if the row is gone.
    async fn set_section_status(
        &self,
        id: HiveSectionId,
        change: &HiveSectionStatusChange,
    ) -> AppResult<StoreHiveSection>;

    /// Remove a soft-deleted section permanently.
    ///
    /// Returns `false` if no such row exists and a conflict if the row is
    /// not soft-deleted at the moment of removal.
    async fn purge_section(&self, id: HiveSectionId) -> AppResult<bool>;

    /// Probe the backing store.
    async fn health_check(&self) -> AppResult<StoreHealth>;
}
