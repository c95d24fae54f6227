//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use katla_core::config::AppConfig;
use katla_database::store::HiveSectionStore;
use katla_service::context::RequestContext;
use katla_service::hive_section::HiveSectionService;

/// Application state passed to every Axum handler via `State<AppState>`.
///
/// All fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Hive section persistence
    pub store: Arc<dyn HiveSectionStore>,
    /// When the process started serving
    pub started_at: Instant,
}

impl AppState {
    /// Creates the shared state.
    pub fn new(config: AppConfig, store: Arc<dyn HiveSectionStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            started_at: Instant::now(),
        }
    }

    /// A hive section service acting on behalf of the request's user.
    pub fn hive_section_service(&self, ctx: &RequestContext) -> HiveSectionService {
        HiveSectionService::new(Arc::clone(&self.store), Arc::new(*ctx))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}
