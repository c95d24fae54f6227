//! Hive section entities.

pub mod model;
pub mod record;

pub use model::{HiveSection, HiveSectionListItem, UpdateHiveSectionRequest};
pub use record::{
    HiveSectionChanges, HiveSectionStatusChange, NewStoreHiveSection, StoreHiveSection,
};
