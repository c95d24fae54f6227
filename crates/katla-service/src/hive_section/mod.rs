//! Hive section lifecycle management.

pub mod mapping;
pub mod service;

pub use service::HiveSectionService;
