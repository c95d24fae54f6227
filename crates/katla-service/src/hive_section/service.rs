//! Hive section lifecycle: listing, lookup, create, update, soft delete,
//! and purge.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use katla_core::error::AppError;
use katla_core::result::AppResult;
use katla_core::traits::UserContext;
use katla_core::types::{HiveId, HiveSectionId};
use katla_database::store::HiveSectionStore;
use katla_entity::hive_section::{
    HiveSection, HiveSectionListItem, HiveSectionStatusChange, StoreHiveSection,
    UpdateHiveSectionRequest,
};

use super::mapping;

/// Validates and applies every change to hive sections.
///
/// Each operation reads, validates, then writes. The store rejects writes
/// that lose a race against a concurrent writer on the same code, edits and
/// status changes write disjoint columns, and a purge re-checks the
/// soft-delete flag as it removes the row. The invariants therefore hold
/// even when two requests pass validation together.
#[derive(Clone)]
pub struct HiveSectionService {
    /// Hive section persistence.
    store: Arc<dyn HiveSectionStore>,
    /// Supplies the acting user for audit columns.
    user_context: Arc<dyn UserContext>,
}

impl std::fmt::Debug for HiveSectionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HiveSectionService")
            .field("user_id", &self.user_context.user_id())
            .finish_non_exhaustive()
    }
}

impl HiveSectionService {
    /// Creates a new hive section service.
    pub fn new(store: Arc<dyn HiveSectionStore>, user_context: Arc<dyn UserContext>) -> Self {
        Self {
            store,
            user_context,
        }
    }

    /// Lists every section, soft-deleted ones included, by ascending ID.
    pub async fn list_hive_sections(&self) -> AppResult<Vec<HiveSectionListItem>> {
        let records = self.store.list_sections().await?;
        Ok(records.iter().map(mapping::to_list_item).collect())
    }

    /// Lists the sections of one hive by ascending ID.
    ///
    /// The hive is not looked up; an unknown ID yields an empty list.
    pub async fn list_hive_sections_by_hive(
        &self,
        hive_id: HiveId,
    ) -> AppResult<Vec<HiveSectionListItem>> {
        let records = self.store.list_sections_by_hive(hive_id).await?;
        Ok(records.iter().map(mapping::to_list_item).collect())
    }

    /// Gets a section by ID.
    pub async fn get_hive_section(&self, id: HiveSectionId) -> AppResult<HiveSection> {
        let record = self.fetch_section(id).await?;
        Ok(mapping::to_hive_section(&record))
    }

    /// Creates a section in the not-deleted state.
    pub async fn create_hive_section(
        &self,
        request: UpdateHiveSectionRequest,
    ) -> AppResult<HiveSection> {
        self.ensure_code_is_free(&request.code, None).await?;
        self.ensure_hive_exists(request.store_hive_id).await?;

        let actor = self.user_context.user_id();
        let record = mapping::to_new_record(&request, actor, Utc::now());
        let record = self.store.insert_section(record).await?;

        info!(
            user_id = %actor,
            section_id = %record.id,
            code = %record.code,
            hive_id = %record.store_hive_id,
            "Hive section created"
        );

        Ok(mapping::to_hive_section(&record))
    }

    /// Overwrites the name, code, and hive of an existing section.
    pub async fn update_hive_section(
        &self,
        id: HiveSectionId,
        request: UpdateHiveSectionRequest,
    ) -> AppResult<HiveSection> {
        self.ensure_code_is_free(&request.code, Some(id)).await?;
        self.ensure_hive_exists(request.store_hive_id).await?;

        self.fetch_section(id).await?;
        let actor = self.user_context.user_id();
        let changes = mapping::to_changes(&request, actor, Utc::now());
        let record = self.store.update_section(id, &changes).await?;

        info!(
            user_id = %actor,
            section_id = %id,
            code = %record.code,
            "Hive section updated"
        );

        Ok(mapping::to_hive_section(&record))
    }

    /// Sets the soft-delete flag. Writes nothing when the flag already
    /// has the requested value.
    pub async fn set_status(&self, id: HiveSectionId, deleted_status: bool) -> AppResult<()> {
        let record = self.fetch_section(id).await?;

        if record.is_deleted == deleted_status {
            debug!(section_id = %id, deleted_status, "Hive section status unchanged");
            return Ok(());
        }

        let actor = self.user_context.user_id();
        let change = HiveSectionStatusChange {
            is_deleted: deleted_status,
            last_updated_by: actor,
            last_updated: Utc::now(),
        };
        self.store.set_section_status(id, &change).await?;

        info!(
            user_id = %actor,
            section_id = %id,
            deleted_status,
            "Hive section status changed"
        );

        Ok(())
    }

    /// Permanently removes a section. Only soft-deleted sections may be
    /// purged.
    pub async fn delete_hive_section(&self, id: HiveSectionId) -> AppResult<()> {
        let record = self.fetch_section(id).await?;

        if !record.is_deleted {
            return Err(AppError::conflict(format!(
                "The hive section with id {id} hasn't got deleted status"
            )));
        }

        if !self.store.purge_section(id).await? {
            return Err(AppError::not_found(format!("Hive section {id} not found")));
        }

        info!(
            user_id = %self.user_context.user_id(),
            section_id = %id,
            code = %record.code,
            "Hive section purged"
        );

        Ok(())
    }

    /// Fails with a conflict if any section other than `excluding` uses
    /// `code`. Soft-deleted sections count.
    async fn ensure_code_is_free(
        &self,
        code: &str,
        excluding: Option<HiveSectionId>,
    ) -> AppResult<()> {
        let clashes = self.store.find_sections_by_code(code, excluding).await?;
        if !clashes.is_empty() {
            return Err(AppError::conflict(format!(
                "The hive section with code {code} exists"
            )));
        }
        Ok(())
    }

    async fn ensure_hive_exists(&self, hive_id: HiveId) -> AppResult<()> {
        if !self.store.hive_exists(hive_id).await? {
            return Err(AppError::conflict(format!(
                "The hive with id {hive_id} does not exist"
            )));
        }
        Ok(())
    }

    async fn fetch_section(&self, id: HiveSectionId) -> AppResult<StoreHiveSection> {
        self.store
            .find_section(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Hive section {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use katla_core::error::ErrorKind;
    use katla_core::traits::user_context::StaticUserContext;
    use katla_core::types::UserId;
    use katla_database::store::MemoryHiveSectionStore;
    use katla_entity::hive_section::NewStoreHiveSection;

    const ACTOR: UserId = UserId(42);

    fn make_service(hives: &[i32]) -> (HiveSectionService, MemoryHiveSectionStore) {
        let store = MemoryHiveSectionStore::with_hives(hives.iter().copied().map(HiveId));
        let service = HiveSectionService::new(
            Arc::new(store.clone()),
            Arc::new(StaticUserContext(ACTOR)),
        );
        (service, store)
    }

    fn request(code: &str, hive: i32) -> UpdateHiveSectionRequest {
        UpdateHiveSectionRequest {
            name: format!("Section {code}"),
            code: code.to_string(),
            store_hive_id: HiveId(hive),
        }
    }

    /// Inserts a row stamped at the Unix epoch, bypassing the service.
    async fn seed_old_section(
        store: &MemoryHiveSectionStore,
        code: &str,
        hive: i32,
        is_deleted: bool,
    ) -> StoreHiveSection {
        store
            .insert_section(NewStoreHiveSection {
                code: code.to_string(),
                name: format!("Section {code}"),
                store_hive_id: HiveId(hive),
                is_deleted,
                created_by: UserId(1),
                last_updated_by: UserId(1),
                last_updated: DateTime::<Utc>::UNIX_EPOCH,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_includes_deleted_sections_in_id_order() {
        let (service, store) = make_service(&[1, 2]);
        seed_old_section(&store, "A", 2, false).await;
        seed_old_section(&store, "B", 1, true).await;
        seed_old_section(&store, "C", 2, false).await;

        let items = service.list_hive_sections().await.unwrap();
        let ids: Vec<i32> = items.iter().map(|i| i.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(items[1].is_deleted);
    }

    #[tokio::test]
    async fn test_list_by_hive_is_ordered_subset() {
        let (service, store) = make_service(&[1, 2]);
        seed_old_section(&store, "A", 2, false).await;
        seed_old_section(&store, "B", 1, false).await;
        seed_old_section(&store, "C", 2, true).await;

        let all = service.list_hive_sections().await.unwrap();
        let by_hive = service.list_hive_sections_by_hive(HiveId(2)).await.unwrap();

        let codes: Vec<&str> = by_hive.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "C"]);
        assert!(by_hive.iter().all(|item| all.contains(item)));
    }

    #[tokio::test]
    async fn test_list_by_unknown_hive_is_empty() {
        let (service, store) = make_service(&[1]);
        seed_old_section(&store, "A", 1, false).await;

        let items = service.list_hive_sections_by_hive(HiveId(77)).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_create_stamps_actor_and_is_retrievable() {
        let (service, store) = make_service(&[5]);

        let created = service.create_hive_section(request("A1", 5)).await.unwrap();
        assert!(!created.is_deleted);
        assert_eq!(created.store_hive_id, HiveId(5));

        let fetched = service.get_hive_section(created.id).await.unwrap();
        assert_eq!(fetched, created);

        let row = store.find_section(created.id).await.unwrap().unwrap();
        assert_eq!(row.created_by, ACTOR);
        assert_eq!(row.last_updated_by, ACTOR);
    }

    #[tokio::test]
    async fn test_create_with_existing_code_conflicts_without_writing() {
        let (service, store) = make_service(&[1]);
        seed_old_section(&store, "A1", 1, true).await;
        let writes = store.write_count().await;

        let err = service.create_hive_section(request("A1", 1)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(err.message.contains("A1"));
        assert_eq!(store.write_count().await, writes);
    }

    #[tokio::test]
    async fn test_create_with_unknown_hive_conflicts_without_writing() {
        let (service, store) = make_service(&[1]);

        let err = service.create_hive_section(request("A1", 9)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(err.message.contains('9'));
        assert_eq!(store.write_count().await, 0);
    }

    #[tokio::test]
    async fn test_update_overwrites_fields_and_stamps() {
        let (service, store) = make_service(&[1, 2]);
        let seeded = seed_old_section(&store, "A1", 1, false).await;

        let mut req = request("B2", 2);
        req.name = "Skates".to_string();
        let updated = service.update_hive_section(seeded.id, req).await.unwrap();

        assert_eq!(updated.id, seeded.id);
        assert_eq!(updated.code, "B2");
        assert_eq!(updated.name, "Skates");
        assert_eq!(updated.store_hive_id, HiveId(2));
        assert!(updated.last_updated > DateTime::<Utc>::UNIX_EPOCH);

        let row = store.find_section(seeded.id).await.unwrap().unwrap();
        assert_eq!(row.created_by, UserId(1));
        assert_eq!(row.last_updated_by, ACTOR);
    }

    #[tokio::test]
    async fn test_update_keeping_own_code_succeeds() {
        let (service, store) = make_service(&[1]);
        let seeded = seed_old_section(&store, "A1", 1, false).await;

        let updated = service
            .update_hive_section(seeded.id, request("A1", 1))
            .await
            .unwrap();
        assert_eq!(updated.code, "A1");
    }

    #[tokio::test]
    async fn test_update_with_other_sections_code_conflicts() {
        let (service, store) = make_service(&[1]);
        seed_old_section(&store, "A1", 1, false).await;
        let second = seed_old_section(&store, "B2", 1, false).await;

        let err = service
            .update_hive_section(second.id, request("A1", 1))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        let row = store.find_section(second.id).await.unwrap().unwrap();
        assert_eq!(row.code, "B2");
    }

    #[tokio::test]
    async fn test_update_with_unknown_hive_conflicts() {
        let (service, store) = make_service(&[1]);
        let seeded = seed_old_section(&store, "A1", 1, false).await;

        let err = service
            .update_hive_section(seeded.id, request("A1", 3))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_update_does_not_touch_deleted_flag() {
        let (service, store) = make_service(&[1]);
        let seeded = seed_old_section(&store, "A1", 1, true).await;

        let updated = service
            .update_hive_section(seeded.id, request("A2", 1))
            .await
            .unwrap();
        assert!(updated.is_deleted);
    }

    #[tokio::test]
    async fn test_set_status_flips_flag_and_stamps() {
        let (service, store) = make_service(&[1]);
        let seeded = seed_old_section(&store, "A1", 1, false).await;

        service.set_status(seeded.id, true).await.unwrap();

        let row = store.find_section(seeded.id).await.unwrap().unwrap();
        assert!(row.is_deleted);
        assert!(row.last_updated > DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(row.last_updated_by, ACTOR);
    }

    #[tokio::test]
    async fn test_set_status_is_idempotent() {
        let (service, store) = make_service(&[1]);
        let seeded = seed_old_section(&store, "A1", 1, false).await;

        service.set_status(seeded.id, true).await.unwrap();
        let after_first = store.find_section(seeded.id).await.unwrap().unwrap();
        let writes = store.write_count().await;

        service.set_status(seeded.id, true).await.unwrap();
        let after_second = store.find_section(seeded.id).await.unwrap().unwrap();

        assert_eq!(store.write_count().await, writes);
        assert_eq!(after_second.last_updated, after_first.last_updated);
    }

    #[tokio::test]
    async fn test_set_status_can_restore() {
        let (service, store) = make_service(&[1]);
        let seeded = seed_old_section(&store, "A1", 1, true).await;

        service.set_status(seeded.id, false).await.unwrap();
        assert!(!service.get_hive_section(seeded.id).await.unwrap().is_deleted);
    }

    #[tokio::test]
    async fn test_delete_requires_soft_delete() {
        let (service, store) = make_service(&[1]);
        let seeded = seed_old_section(&store, "A1", 1, false).await;

        let err = service.delete_hive_section(seeded.id).await.unwrap_err();
        assert!(err.is_conflict());
        assert!(store.find_section(seeded.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_soft_deleted_section_removes_it() {
        let (service, store) = make_service(&[1]);
        let seeded = seed_old_section(&store, "A1", 1, true).await;

        service.delete_hive_section(seeded.id).await.unwrap();

        let err = service.get_hive_section(seeded.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_everywhere() {
        let (service, _store) = make_service(&[1]);
        let missing = HiveSectionId(404);

        assert!(service.get_hive_section(missing).await.unwrap_err().is_not_found());
        assert!(
            service
                .update_hive_section(missing, request("A1", 1))
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(service.set_status(missing, true).await.unwrap_err().is_not_found());
        assert!(service.delete_hive_section(missing).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_create_soft_delete_purge_scenario() {
        let (service, _store) = make_service(&[5]);

        let created = service.create_hive_section(request("A1", 5)).await.unwrap();
        assert!(!created.is_deleted);

        service.set_status(created.id, true).await.unwrap();
        let deleted = service.get_hive_section(created.id).await.unwrap();
        assert!(deleted.is_deleted);
        assert!(deleted.last_updated >= created.last_updated);

        service.delete_hive_section(created.id).await.unwrap();
        assert!(service.get_hive_section(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_purged_code_can_be_reused() {
        let (service, _store) = make_service(&[1]);
        let first = service.create_hive_section(request("A1", 1)).await.unwrap();
        service.set_status(first.id, true).await.unwrap();
        service.delete_hive_section(first.id).await.unwrap();

        let second = service.create_hive_section(request("A1", 1)).await.unwrap();
        assert_ne!(second.id, first.id);
    }
}
