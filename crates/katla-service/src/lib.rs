//! # katla-service
//!
//! Business logic layer for KatlaSport hive management. The
//! [`HiveSectionService`] is the only component allowed to mutate hive
//! sections; it validates every write before touching the store.
//!
//! Services follow constructor injection: the store and the identity
//! provider are handed in as `Arc` trait objects.

pub mod context;
pub mod hive_section;

pub use context::RequestContext;
pub use hive_section::HiveSectionService;
