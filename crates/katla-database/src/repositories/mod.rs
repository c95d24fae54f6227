//! sqlx repositories for hive management tables.

pub mod hive;
pub mod hive_section;

pub use hive::HiveRepository;
pub use hive_section::HiveSectionRepository;
