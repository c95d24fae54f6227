//! # katla-database
//!
//! PostgreSQL connection management, sqlx repositories, and the
//! [`HiveSectionStore`] persistence boundary with its PostgreSQL and
//! in-memory implementations.

pub mod connection;
pub mod repositories;
pub mod store;

pub use connection::{DatabasePool, PoolStats};
pub use store::{HiveSectionStore, MemoryHiveSectionStore, PgHiveSectionStore, StoreHealth};
