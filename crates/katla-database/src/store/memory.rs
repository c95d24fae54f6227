//! In-memory hive section store using a Tokio mutex.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use katla_core::error::AppError;
use katla_core::result::AppResult;
use katla_core::types::{HiveId, HiveSectionId};
use katla_entity::hive_section::{
    HiveSectionChanges, HiveSectionStatusChange, NewStoreHiveSection, StoreHiveSection,
};

use super::{HiveSectionStore, StoreHealth};

#[derive(Debug, Default)]
struct InnerState {
    /// Last assigned section ID.
    last_id: i32,
    /// Sections keyed (and therefore ordered) by ID.
    sections: BTreeMap<HiveSectionId, StoreHiveSection>,
    /// Known hive IDs.
    hives: BTreeSet<HiveId>,
    /// Number of successful insert, update, and purge calls.
    writes: u64,
}

impl InnerState {
    /// Enforce the same guards the PostgreSQL constraints provide.
    fn check_constraints(
        &self,
        code: &str,
        hive_id: HiveId,
        own_id: Option<HiveSectionId>,
    ) -> AppResult<()> {
        if self
            .sections
            .values()
            .any(|s| s.code == code && Some(s.id) != own_id)
        {
            return Err(AppError::conflict(format!(
                "The hive section with code {code} exists"
            )));
        }
        if !self.hives.contains(&hive_id) {
            return Err(AppError::conflict(format!(
                "The hive with id {hive_id} does not exist"
            )));
        }
        Ok(())
    }

    fn section_mut(&mut self, id: HiveSectionId) -> AppResult<&mut StoreHiveSection> {
        self.sections
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Hive section {id} not found")))
    }
}

/// Process-local hive section store.
///
/// Suitable for tests and single-node development runs. All state is
/// behind one mutex, so each call is atomic.
#[derive(Debug, Clone, Default)]
pub struct MemoryHiveSectionStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryHiveSectionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already knows the given hives.
    pub fn with_hives(hives: impl IntoIterator<Item = HiveId>) -> Self {
        let state = InnerState {
            hives: hives.into_iter().collect(),
            ..InnerState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Registers a hive so sections may reference it.
    pub async fn add_hive(&self, hive_id: HiveId) {
        self.state.lock().await.hives.insert(hive_id);
    }

    /// Number of successful writes performed so far.
    pub async fn write_count(&self) -> u64 {
        self.state.lock().await.writes
    }
}

#[async_trait]
impl HiveSectionStore for MemoryHiveSectionStore {
    async fn list_sections(&self) -> AppResult<Vec<StoreHiveSection>> {
        let state = self.state.lock().await;
        Ok(state.sections.values().cloned().collect())
    }

    async fn list_sections_by_hive(&self, hive_id: HiveId) -> AppResult<Vec<StoreHiveSection>> {
        let state = self.state.lock().await;
        Ok(state
            .sections
            .values()
            .filter(|s| s.store_hive_id == hive_id)
            .cloned()
            .collect())
    }

    async fn find_section(&self, id: HiveSectionId) -> AppResult<Option<StoreHiveSection>> {
        Ok(self.state.lock().await.sections.get(&id).cloned())
    }

    async fn find_sections_by_code(
        &self,
        code: &str,
        excluding: Option<HiveSectionId>,
    ) -> AppResult<Vec<StoreHiveSection>> {
        let state = self.state.lock().await;
        Ok(state
            .sections
            .values()
            .filter(|s| s.code == code && Some(s.id) != excluding)
            .cloned()
            .collect())
    }

    async fn hive_exists(&self, hive_id: HiveId) -> AppResult<bool> {
        Ok(self.state.lock().await.hives.contains(&hive_id))
    }

    async fn insert_section(&self, section: NewStoreHiveSection) -> AppResult<StoreHiveSection> {
        let mut state = self.state.lock().await;
        state.check_constraints(&section.code, section.store_hive_id, None)?;

        state.last_id += 1;
        let id = HiveSectionId(state.last_id);
        let row = section.with_id(id);
        state.sections.insert(id, row.clone());
        state.writes += 1;

        debug!(section_id = %id, "Inserted hive section");
        Ok(row)
    }

    async fn update_section(
        &self,
        id: HiveSectionId,
        changes: &HiveSectionChanges,
    ) -> AppResult<StoreHiveSection> {
        let mut state = self.state.lock().await;
        state.section_mut(id)?;
        state.check_constraints(&changes.code, changes.store_hive_id, Some(id))?;

        let row = state.section_mut(id)?;
        row.code = changes.code.clone();
        row.name = changes.name.clone();
        row.store_hive_id = changes.store_hive_id;
        row.last_updated_by = changes.last_updated_by;
        row.last_updated = changes.last_updated;
        let row = row.clone();

        state.writes += 1;
        Ok(row)
    }

    async fn set_section_status(
        &self,
        id: HiveSectionId,
        change: &HiveSectionStatusChange,
    ) -> AppResult<StoreHiveSection> {
        let mut state = self.state.lock().await;
        let row = state.section_mut(id)?;
        row.is_deleted = change.is_deleted;
        row.last_updated_by = change.last_updated_by;
        row.last_updated = change.last_updated;
        let row = row.clone();

        state.writes += 1;
        Ok(row)
    }

    async fn purge_section(&self, id: HiveSectionId) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        match state.sections.get(&id) {
            None => return Ok(false),
            Some(row) if !row.is_deleted => {
                return Err(AppError::conflict(format!(
                    "The hive section with id {id} hasn't got deleted status"
                )));
            }
            Some(_) => {}
        }

        state.sections.remove(&id);
        state.writes += 1;
        debug!(section_id = %id, "Purged hive section");
        Ok(true)
    }

    async fn health_check(&self) -> AppResult<StoreHealth> {
        Ok(StoreHealth {
            backend: "memory",
            reachable: true,
            pool: None,
        })
    }
}
