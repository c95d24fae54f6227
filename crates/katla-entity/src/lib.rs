//! # katla-entity
//!
//! Domain entity models for KatlaSport hive management. Records that map
//! to a database row derive `sqlx::FromRow`; the transient request and
//! result shapes exchanged with the service layer live beside them.

pub mod hive_section;
