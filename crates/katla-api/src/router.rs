//! Route definitions for the hive management HTTP API.
//!
//! All routes are mounted under `/api` and receive `AppState` through
//! Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(hive_section_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Hive section listing, lookup, lifecycle
fn hive_section_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/sections",
            get(handlers::hive_section::list_sections).post(handlers::hive_section::create_section),
        )
        .route(
            "/sections/{id}",
            get(handlers::hive_section::get_section)
                .put(handlers::hive_section::update_section)
                .delete(handlers::hive_section::delete_section),
        )
        .route(
            "/sections/{id}/status/{deleted_status}",
            put(handlers::hive_section::set_section_status),
        )
        .route(
            "/hives/{hive_id}/sections",
            get(handlers::hive_section::list_hive_sections),
        )
}

/// Liveness and store health
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
