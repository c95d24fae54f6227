//! KatlaSport hive management server.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use katla_api::AppState;
use katla_core::config::{AppConfig, StoreProvider};
use katla_core::error::AppError;
use katla_core::types::HiveId;
use katla_database::store::{HiveSectionStore, MemoryHiveSectionStore, PgHiveSectionStore};
use katla_database::DatabasePool;

#[tokio::main]
async fn main() {
    let env = std::env::var("KATLA_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting KatlaSport hive management v{}", env!("CARGO_PKG_VERSION"));

    let (store, pool): (Arc<dyn HiveSectionStore>, Option<DatabasePool>) =
        match config.database.provider {
            StoreProvider::Postgres => {
                let pool = DatabasePool::connect(&config.database).await?;
                (Arc::new(PgHiveSectionStore::new(pool.clone())), Some(pool))
            }
            StoreProvider::Memory => {
                tracing::warn!(
                    hives = config.database.memory_hives.len(),
                    "Using in-memory store; data will not survive a restart"
                );
                let hives = config.database.memory_hives.iter().copied().map(HiveId);
                (Arc::new(MemoryHiveSectionStore::with_hives(hives)), None)
            }
        };

    let state = AppState::new(config, store);
    let result = katla_api::serve(state).await;

    if let Some(pool) = pool {
        pool.close().await;
    }

    result
}
