//! Store hive repository.

use sqlx::PgPool;

use katla_core::error::{AppError, ErrorKind};
use katla_core::result::AppResult;
use katla_core::types::HiveId;

/// Existence checks against `store_hives`.
#[derive(Debug, Clone)]
pub struct HiveRepository {
    pool: PgPool,
}

impl HiveRepository {
    /// Create a new hive repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether a hive row with this ID exists, deleted or not.
    pub async fn exists(&self, id: HiveId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM store_hives WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check hive existence", e)
            })
    }
}
