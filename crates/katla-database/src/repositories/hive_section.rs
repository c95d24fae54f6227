//! Hive section repository implementation.

use sqlx::PgPool;

use katla_core::error::{AppError, ErrorKind};
use katla_core::result::AppResult;
use katla_core::types::{HiveId, HiveSectionId};
use katla_entity::hive_section::{
    HiveSectionChanges, HiveSectionStatusChange, NewStoreHiveSection, StoreHiveSection,
};

const CODE_UNIQUE_CONSTRAINT: &str = "store_hive_sections_code_key";
const HIVE_FOREIGN_KEY: &str = "store_hive_sections_store_hive_id_fkey";

/// Repository for `store_hive_sections` CRUD.
#[derive(Debug, Clone)]
pub struct HiveSectionRepository {
    pool: PgPool,
}

impl HiveSectionRepository {
    /// Create a new hive section repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every section ordered by ID.
    pub async fn find_all(&self) -> AppResult<Vec<StoreHiveSection>> {
        sqlx::query_as::<_, StoreHiveSection>("SELECT * FROM store_hive_sections ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list sections", e))
    }

    /// List the sections of one hive ordered by ID.
    pub async fn find_by_hive(&self, hive_id: HiveId) -> AppResult<Vec<StoreHiveSection>> {
        sqlx::query_as::<_, StoreHiveSection>(
            "SELECT * FROM store_hive_sections WHERE store_hive_id = $1 ORDER BY id ASC",
        )
        .bind(hive_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list sections by hive", e)
        })
    }

    /// Find a section by ID.
    pub async fn find_by_id(&self, id: HiveSectionId) -> AppResult<Option<StoreHiveSection>> {
        sqlx::query_as::<_, StoreHiveSection>("SELECT * FROM store_hive_sections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find section", e))
    }

    /// Find sections carrying `code`, optionally skipping one ID.
    pub async fn find_by_code(
        &self,
        code: &str,
        excluding: Option<HiveSectionId>,
    ) -> AppResult<Vec<StoreHiveSection>> {
        sqlx::query_as::<_, StoreHiveSection>(
            "SELECT * FROM store_hive_sections \
             WHERE code = $1 AND ($2::INT IS NULL OR id <> $2) ORDER BY id ASC",
        )
        .bind(code)
        .bind(excluding)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find sections by code", e)
        })
    }

    /// Insert a section and return it with the assigned ID.
    pub async fn create(&self, data: &NewStoreHiveSection) -> AppResult<StoreHiveSection> {
        sqlx::query_as::<_, StoreHiveSection>(
            "INSERT INTO store_hive_sections \
             (code, name, store_hive_id, is_deleted, created_by, last_updated_by, last_updated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.code)
        .bind(&data.name)
        .bind(data.store_hive_id)
        .bind(data.is_deleted)
        .bind(data.created_by)
        .bind(data.last_updated_by)
        .bind(data.last_updated)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &data.code, data.store_hive_id, "Failed to create section"))
    }

    /// Write code, name, hive and audit columns. The soft-delete flag is
    /// left as stored.
    pub async fn update_fields(
        &self,
        id: HiveSectionId,
        changes: &HiveSectionChanges,
    ) -> AppResult<StoreHiveSection> {
        sqlx::query_as::<_, StoreHiveSection>(
            "UPDATE store_hive_sections SET code = $2, name = $3, store_hive_id = $4, \
             last_updated_by = $5, last_updated = $6 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.code)
        .bind(&changes.name)
        .bind(changes.store_hive_id)
        .bind(changes.last_updated_by)
        .bind(changes.last_updated)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, &changes.code, changes.store_hive_id, "Failed to update section")
        })?
        .ok_or_else(|| AppError::not_found(format!("Hive section {id} not found")))
    }

    /// Write the soft-delete flag and audit columns only.
    pub async fn update_status(
        &self,
        id: HiveSectionId,
        change: &HiveSectionStatusChange,
    ) -> AppResult<StoreHiveSection> {
        sqlx::query_as::<_, StoreHiveSection>(
            "UPDATE store_hive_sections SET is_deleted = $2, last_updated_by = $3, \
             last_updated = $4 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(change.is_deleted)
        .bind(change.last_updated_by)
        .bind(change.last_updated)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update section status", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Hive section {id} not found")))
    }

    /// Delete a section only if it is soft-deleted. Returns `true` if a row
    /// was removed.
    pub async fn delete_soft_deleted(&self, id: HiveSectionId) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM store_hive_sections WHERE id = $1 AND is_deleted")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete section", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a section row with this ID exists.
    pub async fn exists(&self, id: HiveSectionId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM store_hive_sections WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check section existence", e)
        })
    }
}

/// Translate constraint violations into conflicts; everything else stays a
/// database error.
fn map_write_error(e: sqlx::Error, code: &str, hive_id: HiveId, context: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(CODE_UNIQUE_CONSTRAINT) => {
            AppError::conflict(format!("The hive section with code {code} exists"))
        }
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(HIVE_FOREIGN_KEY) => {
            AppError::conflict(format!("The hive with id {hive_id} does not exist"))
        }
        _ => AppError::with_source(ErrorKind::Database, context, e),
    }
}
