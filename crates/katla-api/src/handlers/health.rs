//! Health check handlers.

use axum::Json;
use axum::extract::State;

use katla_database::StoreHealth;

use crate::dto::response::{ApiResponse, DetailedHealthResponse, HealthResponse, PoolUsage};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    }))
}

/// GET /api/health/detailed
pub async fn health_detailed(
    State(state): State<AppState>,
) -> Json<ApiResponse<DetailedHealthResponse>> {
    let health = match state.store.health_check().await {
        Ok(health) => health,
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            StoreHealth {
                backend: state.config.database.provider.as_str(),
                reachable: false,
                pool: None,
            }
        }
    };

    Json(ApiResponse::ok(DetailedHealthResponse {
        status: if health.reachable { "ok" } else { "degraded" }.to_string(),
        database: if health.reachable { "connected" } else { "unreachable" }.to_string(),
        backend: health.backend.to_string(),
        pool: health.pool.map(|p| PoolUsage {
            size: p.size,
            idle: p.idle,
        }),
    }))
}
